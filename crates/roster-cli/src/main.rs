//! `roster`: terminal UI and batch commands for the personnel roster.
//!
//! # Usage
//!
//! ```
//! roster                                   # open the TUI
//! roster export --format xlsx --sort title
//! roster template --out personnel-database.json
//! roster import personnel-database.json
//! roster settings --database-url postgres://db/roster
//! ```

mod app;
mod config;
mod input;
mod ui;

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use roster_core::{
  column::Column,
  export::{self, ExportFormat},
  query::{ColumnVisibility, RosterQuery, SortDirection, SortKey, SortState},
  roster::Roster,
  store::RosterStore,
};
use roster_store_sqlite::SqliteStore;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::config::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Personnel roster for the inspection board")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "roster.toml")]
  config: PathBuf,

  /// SQLite store to use instead of the configured one.
  #[arg(long, env = "ROSTER_STORE", value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Open the interactive table (the default).
  Tui,

  /// Write the roster as a spreadsheet or HTML document.
  Export {
    #[arg(short, long, value_enum, default_value_t = FormatArg::Xlsx)]
    format: FormatArg,

    /// Output file. Defaults to the standard file name in the export dir.
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Include inactive personnel.
    #[arg(long)]
    all: bool,

    /// Only rows containing this text.
    #[arg(long)]
    search: Option<String>,

    /// Primary sort column (key such as `fullName` or `audit_seniority_years`).
    #[arg(long)]
    sort: Option<Column>,

    /// Sort the primary column descending.
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Comma-separated columns to include. Defaults to all.
    #[arg(long, value_delimiter = ',')]
    columns: Vec<Column>,
  },

  /// Write the empty-roster bootstrap file.
  Template {
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
  },

  /// Replace the stored roster with the contents of a JSON file.
  Import { file: PathBuf },

  /// Show or change the stored database URL.
  Settings {
    #[arg(long, conflicts_with = "clear")]
    database_url: Option<String>,

    #[arg(long)]
    clear: bool,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
  Xlsx,
  Html,
}

impl From<FormatArg> for ExportFormat {
  fn from(arg: FormatArg) -> Self {
    match arg {
      FormatArg::Xlsx => ExportFormat::Spreadsheet,
      FormatArg::Html => ExportFormat::Document,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(store) = &cli.store {
    settings.store_path = config::expand_tilde(store);
  }
  init_logging(&settings)?;

  if let Some(parent) = settings.store_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }
  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("opening store {}", settings.store_path.display()))?;
  tracing::info!(path = %settings.store_path.display(), "store opened");

  match cli.command.unwrap_or(Command::Tui) {
    Command::Tui => run_tui(store, &settings).await,
    Command::Export { format, out, all, search, sort, desc, columns } => {
      let mut query = RosterQuery { active_only: !all, ..RosterQuery::default() };
      if let Some(search) = search {
        query.search = search;
      }
      if let Some(column) = sort {
        let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
        query.sort = SortState {
          primary: SortKey::new(column, direction),
          ..SortState::default().select(column)
        };
      }
      if !columns.is_empty() {
        query.columns = Column::all()
          .filter(|c| !columns.contains(c))
          .fold(ColumnVisibility::default(), ColumnVisibility::toggle);
      }
      let roster = store.load_roster().await?;
      let rows = query.apply(roster.records());
      let table = export::project(&rows, &query.columns.visible());
      let artifact = roster_export::export(&table, format.into(), Local::now().naive_local())?;
      let path = out.unwrap_or_else(|| settings.export_dir().join(artifact.filename));
      write_file(&path, &artifact.bytes)?;
      println!("{} rows written to {}", table.rows.len(), path.display());
      Ok(())
    }
    Command::Template { out } => {
      let artifact = roster_export::template()?;
      let path = out.unwrap_or_else(|| settings.export_dir().join(artifact.filename));
      write_file(&path, &artifact.bytes)?;
      println!("template written to {}", path.display());
      Ok(())
    }
    Command::Import { file } => {
      let json = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
      let roster = Roster::from_json(&json).context("parsing roster file")?;
      store.save_roster(&roster).await?;
      tracing::info!(records = roster.len(), file = %file.display(), "roster imported");
      println!("{} records imported", roster.len());
      Ok(())
    }
    Command::Settings { database_url, clear } => {
      if clear {
        store.set_database_url(None).await?;
      } else if let Some(url) = database_url.as_deref() {
        store.set_database_url(Some(url)).await?;
      }
      match store.database_url().await? {
        Some(url) => println!("databaseUrl = {url}"),
        None => println!("databaseUrl is not set"),
      }
      Ok(())
    }
  }
}

/// Tracing goes to a file so it never draws over the TUI.
fn init_logging(settings: &Settings) -> Result<()> {
  let path = settings.log_path();
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).ok();
  }
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&path)
    .with_context(|| format!("opening log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

fn write_file(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
  std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

// ─── TUI ──────────────────────────────────────────────────────────────────────

async fn run_tui(store: SqliteStore, settings: &Settings) -> Result<()> {
  // A broken stored roster must not lock the user out; start empty instead.
  let roster = match store.load_roster().await {
    Ok(roster) => roster,
    Err(e) => {
      tracing::error!(error = %e, "failed to load roster, starting empty");
      Roster::default()
    }
  };
  let database_url = store.database_url().await?;
  let mut app = App::new(store, roster, database_url, settings.export_dir());

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}
