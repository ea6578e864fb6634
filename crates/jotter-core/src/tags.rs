//! Tag input parsing and tag vocabulary derivation.

use std::collections::HashSet;

use crate::models::Note;

/// Parse a comma-separated tag string as typed into the note form.
///
/// Segments are trimmed and empty ones dropped; order is kept and
/// duplicates are not removed.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

/// Deduplicated union of every tag across `notes`, in first-seen order.
pub fn tag_vocabulary(notes: &[Note]) -> Vec<String> {
    let mut seen = HashSet::new();
    notes
        .iter()
        .flat_map(|note| note.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}
