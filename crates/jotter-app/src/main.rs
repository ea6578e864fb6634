//! jotter: terminal client for the jotter notes service.
//!
//! Sign in once; the session is kept in a per-user file that every
//! `jotter` process shares.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use jotter_app::config::read_password;
use jotter_app::{telemetry, AppConfig, AuthService, NoteListController, Route, RouteGuard};
use jotter_client::ApiClient;
use jotter_core::{Note, SessionEventOrigin, TagFilter};
use jotter_session::FileSessionStore;

#[derive(Parser)]
#[command(name = "jotter")]
#[command(author, version, about = "Tagged notes from the terminal")]
#[command(propagate_version = true)]
struct Cli {
    /// API base URL (overrides JOTTER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in (password from JOTTER_PASSWORD or a prompt)
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,
    },

    /// Sign in with an existing account (password from JOTTER_PASSWORD or a prompt)
    Login {
        #[arg(short, long)]
        email: String,
    },

    /// Forget the stored session
    Logout,

    /// List notes
    List {
        /// Only notes with this tag (filtered by the server)
        #[arg(short, long)]
        tag: Option<String>,

        /// Case-insensitive text to match in title or content
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a note
    Add {
        #[arg(long)]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,

        /// Comma-separated tags, e.g. "work, urgent"
        #[arg(long, default_value = "")]
        tags: String,
    },

    /// Delete a note by id
    Delete { id: String },

    /// List every tag in use
    Tags,

    /// Print session changes made by other jotter processes until Ctrl-C
    Watch,
}

type Api = ApiClient;
type Session = FileSessionStore;

struct App {
    api: Arc<Api>,
    session: Arc<Session>,
    guard: RouteGuard<Session>,
}

impl App {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let api = Arc::new(ApiClient::new(config.client).context("building HTTP client")?);
        let session = Arc::new(FileSessionStore::new(config.session_path));
        let guard = RouteGuard::new(Arc::clone(&session));
        Ok(Self {
            api,
            session,
            guard,
        })
    }

    fn auth(&self) -> AuthService<Api, Session> {
        AuthService::new(Arc::clone(&self.api), Arc::clone(&self.session))
    }

    /// Controller for the notes view, refusing when the guard sends us to login.
    fn notes_view(&self) -> anyhow::Result<NoteListController<Api, Session>> {
        let navigation = self.guard.resolve(Route::Notes.path());
        if navigation.route() != Route::Notes {
            bail!("Not authenticated. Run `jotter login` first.");
        }
        Ok(NoteListController::new(
            Arc::clone(&self.api),
            Arc::clone(&self.session),
        ))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = telemetry::init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env(cli.api_url)?;
    let app = App::new(config)?;

    match cli.command {
        Commands::Register { name, email } => {
            let password = read_password(true)?;
            app.auth().register(&name, &email, &password).await?;
            println!("Registered and signed in as {}", email);
        }
        Commands::Login { email } => {
            let password = read_password(false)?;
            app.auth().login(&email, &password).await?;
            println!("Signed in as {}", email);
        }
        Commands::Logout => {
            app.auth().logout()?;
            println!("Signed out");
        }
        Commands::List { tag, search } => cmd_list(&app, tag, search).await?,
        Commands::Add {
            title,
            content,
            tags,
        } => cmd_add(&app, title, content, tags).await?,
        Commands::Delete { id } => cmd_delete(&app, &id).await?,
        Commands::Tags => cmd_tags(&app).await?,
        Commands::Watch => cmd_watch(&app).await?,
    }

    Ok(())
}

async fn cmd_list(app: &App, tag: Option<String>, search: Option<String>) -> anyhow::Result<()> {
    let mut view = app.notes_view()?.with_tag_filter(TagFilter::from(tag));
    view.mount().await;
    if let Some(message) = view.error() {
        bail!("{}", message);
    }
    if let Some(search) = search {
        view.set_search(search);
    }

    let notes = view.filtered_notes();
    if notes.is_empty() {
        println!("No notes found.");
        return Ok(());
    }
    for note in notes {
        print_note(note);
    }
    Ok(())
}

async fn cmd_add(app: &App, title: String, content: String, tags: String) -> anyhow::Result<()> {
    let mut view = app.notes_view()?;
    {
        let draft = view.draft_mut();
        draft.title = title;
        draft.content = content;
        draft.tags = tags;
    }

    if !view.submit_draft().await {
        bail!("{}", view.error().unwrap_or("Failed to add note"));
    }
    if let Some(note) = view.notes().first() {
        println!("Added note {}", note.id);
    }
    Ok(())
}

async fn cmd_delete(app: &App, id: &str) -> anyhow::Result<()> {
    let mut view = app.notes_view()?;
    if !view.delete_note_by_id(id).await {
        bail!("{}", view.error().unwrap_or("Failed to delete note"));
    }
    println!("Deleted note {}", id);
    Ok(())
}

async fn cmd_tags(app: &App) -> anyhow::Result<()> {
    let mut view = app.notes_view()?;
    view.mount().await;
    if let Some(message) = view.error() {
        bail!("{}", message);
    }
    for tag in view.all_tags() {
        println!("{}", tag);
    }
    Ok(())
}

async fn cmd_watch(app: &App) -> anyhow::Result<()> {
    let _watcher = app.session.watch()?;
    let mut events = app.guard.subscribe();

    println!(
        "Watching {} (currently {}). Press Ctrl-C to stop.",
        app.session.path().display(),
        app.guard.default_route()
    );

    loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(event) if event.origin == SessionEventOrigin::External => {
                    let now_at = app.guard.resolve(Route::Notes.path()).route();
                    let what = if event.is_signed_in() { "signed in" } else { "signed out" };
                    println!("{} {} elsewhere; notes view -> {}", event.occurred_at.to_rfc3339(), what, now_at);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "session events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

fn print_note(note: &Note) {
    if note.tags.is_empty() {
        println!("{}  {}", note.id, note.title);
    } else {
        println!("{}  {}  [{}]", note.id, note.title, note.tags.join(", "));
    }
    for line in note.content.lines() {
        println!("    {}", line);
    }
}
