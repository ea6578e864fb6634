//! Client-side search over the loaded note list.

use crate::models::Note;

/// Notes whose title or content contains `search`, ignoring case.
///
/// An empty search matches every note. List order is preserved.
pub fn filter_notes<'a>(notes: &'a [Note], search: &str) -> Vec<&'a Note> {
    let needle = search.to_lowercase();
    notes
        .iter()
        .filter(|note| note.matches_lowercase(&needle))
        .collect()
}
