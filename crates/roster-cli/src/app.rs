//! Application state and event dispatcher.
//!
//! Screen state lives in a [`ViewState`] owned by `roster-core`; this module
//! turns key presses into [`ViewAction`]s, feeds them through the reducer,
//! and carries out the resulting [`Effect`]s against the roster, the store
//! and the file system.

use std::{mem, path::PathBuf};

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use roster_core::{
  column::Column,
  export::{self, ExportFormat},
  form::FormField,
  record::PersonnelRecord,
  roster::Roster,
  store::RosterStore,
  view::{Dialog, Effect, ViewAction, ViewState},
};
use roster_store_sqlite::SqliteStore;
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::input;

/// Export formats in the order the export dialog lists them.
pub const EXPORT_FORMATS: [ExportFormat; 2] = [ExportFormat::Spreadsheet, ExportFormat::Document];

pub fn today() -> NaiveDate { Local::now().date_naive() }

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub store: SqliteStore,

  /// The whole roster, as last persisted.
  pub roster: Roster,

  /// Query and open dialog.
  pub view: ViewState,

  /// Cursor position within the *filtered* rows.
  pub cursor: usize,

  /// Index into the visible columns; the column `o` sorts by.
  pub focus_column: usize,

  /// Whether the user is typing a search query.
  pub search_active: bool,

  /// Focused field while a record form is open.
  pub form_field: FormField,

  /// Cursor inside list dialogs (export formats, column chooser).
  pub menu_cursor: usize,

  /// Current value of the store's database URL key.
  pub database_url: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  export_dir: PathBuf,
}

impl App {
  pub fn new(
    store: SqliteStore,
    roster: Roster,
    database_url: Option<String>,
    export_dir: PathBuf,
  ) -> Self {
    Self {
      store,
      roster,
      view: ViewState::default(),
      cursor: 0,
      focus_column: 0,
      search_active: false,
      form_field: FormField::RegistryNumber,
      menu_cursor: 0,
      database_url,
      status_msg: String::new(),
      export_dir,
    }
  }

  // ── Derived view ──────────────────────────────────────────────────────────

  /// Rows after filter and sort.
  pub fn rows(&self) -> Vec<&PersonnelRecord> { self.view.query.apply(self.roster.records()) }

  pub fn visible_columns(&self) -> Vec<Column> { self.view.query.columns.visible() }

  fn cursor_id(&self) -> Option<Uuid> { self.rows().get(self.cursor).map(|r| r.id) }

  fn clamp_cursors(&mut self) {
    let rows = self.rows().len();
    self.cursor = self.cursor.min(rows.saturating_sub(1));
    let columns = self.visible_columns().len();
    self.focus_column = self.focus_column.min(columns.saturating_sub(1));
  }

  // ── Dispatch ──────────────────────────────────────────────────────────────

  /// Run `action` through the reducer and return its effect, if any.
  fn reduce(&mut self, action: ViewAction) -> Option<Effect> {
    let before = mem::discriminant(&self.view.dialog);
    let (view, effect) = mem::take(&mut self.view).reduce(action, &self.roster, today());
    self.view = view;
    if mem::discriminant(&self.view.dialog) != before {
      self.form_field = FormField::RegistryNumber;
      self.menu_cursor = 0;
    }
    self.clamp_cursors();
    effect
  }

  pub async fn dispatch(&mut self, action: ViewAction) {
    if let Some(effect) = self.reduce(action) {
      self.run_effect(effect).await;
      self.clamp_cursors();
    }
  }

  async fn run_effect(&mut self, effect: Effect) {
    match effect {
      Effect::Commit { mode, record } => {
        let name = record.full_name.clone();
        match self.roster.commit(mode, record) {
          Ok(()) => {
            self.status_msg = format!("Saved {name}");
            self.persist().await;
          }
          Err(e) => self.fail("commit failed", e),
        }
      }
      Effect::Delete(id) => match self.roster.remove(id) {
        Ok(record) => {
          self.status_msg = format!("Deleted {}", record.full_name);
          self.persist().await;
        }
        Err(e) => self.fail("delete failed", e),
      },
      Effect::ToggleStatus(id) => match self.roster.toggle_status(id, today()) {
        Ok(status) => {
          self.status_msg = format!("Status set to {status}");
          self.persist().await;
        }
        Err(e) => self.fail("status toggle failed", e),
      },
      Effect::Export(format) => match self.write_export(format).await {
        Ok(path) => {
          self.status_msg = format!("Exported to {}", path.display());
          self.reduce(ViewAction::ExportFinished);
        }
        Err(e) => self.fail("export failed", e),
      },
      Effect::SaveDatabaseUrl(url) => match self.store.set_database_url(url.as_deref()).await {
        Ok(()) => {
          tracing::info!(set = url.is_some(), "database url updated");
          self.status_msg = if url.is_some() {
            "Database URL saved".into()
          } else {
            "Database URL cleared".into()
          };
          self.database_url = url;
        }
        Err(e) => self.fail("saving database url failed", e),
      },
    }
  }

  /// Hand the whole roster back to the store.
  async fn persist(&mut self) {
    if let Err(e) = self.store.save_roster(&self.roster).await {
      self.fail("saving roster failed", e);
    }
  }

  fn fail(&mut self, what: &str, error: impl std::fmt::Display) {
    tracing::error!(error = %error, "{what}");
    self.status_msg = format!("Error: {what}: {error}");
  }

  async fn write_export(&self, format: ExportFormat) -> anyhow::Result<PathBuf> {
    let rows = self.rows();
    let table = export::project(&rows, &self.visible_columns());
    let artifact = roster_export::export(&table, format, Local::now().naive_local())?;
    let path = self.export_dir.join(artifact.filename);
    tokio::fs::write(&path, &artifact.bytes).await?;
    Ok(path)
  }

  async fn write_template(&mut self) {
    let result = async {
      let artifact = roster_export::template()?;
      let path = self.export_dir.join(artifact.filename);
      tokio::fs::write(&path, &artifact.bytes).await?;
      anyhow::Ok(path)
    }
    .await;
    match result {
      Ok(path) => self.status_msg = format!("Template written to {}", path.display()),
      Err(e) => self.fail("template failed", e),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.search_active {
      self.handle_search_key(key).await;
      return Ok(true);
    }

    match &self.view.dialog {
      Dialog::Idle => return self.handle_table_key(key).await,
      Dialog::Add(_) | Dialog::Edit(_) => self.handle_form_key(key).await,
      Dialog::DeleteConfirm(_) => match key.code {
        KeyCode::Char('y') | KeyCode::Enter => self.dispatch(ViewAction::ConfirmDelete).await,
        KeyCode::Char('n') | KeyCode::Esc => self.dispatch(ViewAction::Cancel).await,
        _ => {}
      },
      Dialog::Export => self.handle_menu_key(key, EXPORT_FORMATS.len()).await,
      Dialog::Columns => self.handle_menu_key(key, Column::all().count()).await,
      Dialog::Settings { database_url } => {
        let mut url = database_url.clone();
        match key.code {
          KeyCode::Enter => self.dispatch(ViewAction::SaveSettings).await,
          KeyCode::Esc => self.dispatch(ViewAction::Cancel).await,
          KeyCode::Backspace => {
            url.pop();
            self.dispatch(ViewAction::SettingsInput(url)).await;
          }
          KeyCode::Char(c) => {
            url.push(c);
            self.dispatch(ViewAction::SettingsInput(url)).await;
          }
          _ => {}
        }
      }
    }
    Ok(true)
  }

  async fn handle_search_key(&mut self, key: KeyEvent) {
    let mut search = self.view.query.search.clone();
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        search.clear();
      }
      KeyCode::Enter => {
        self.search_active = false;
        return;
      }
      KeyCode::Backspace => {
        search.pop();
      }
      KeyCode::Char(c) => search.push(c),
      _ => return,
    }
    self.cursor = 0;
    self.dispatch(ViewAction::Search(search)).await;
  }

  async fn handle_table_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.rows().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::PageDown => self.cursor += 20,
      KeyCode::PageUp => self.cursor = self.cursor.saturating_sub(20),
      KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
      KeyCode::End | KeyCode::Char('G') => self.cursor = usize::MAX,
      KeyCode::Right | KeyCode::Char('l') => self.focus_column += 1,
      KeyCode::Left | KeyCode::Char('h') => {
        self.focus_column = self.focus_column.saturating_sub(1)
      }

      // Query
      KeyCode::Char('/') => self.search_active = true,
      KeyCode::Char('a') => self.dispatch(ViewAction::ToggleActiveOnly).await,
      KeyCode::Char('o') => {
        if let Some(column) = self.visible_columns().get(self.focus_column).copied() {
          self.dispatch(ViewAction::SortBy(column)).await;
        }
      }

      // Records
      KeyCode::Char('n') => self.dispatch(ViewAction::OpenAdd).await,
      KeyCode::Enter | KeyCode::Char('e') => {
        if let Some(id) = self.cursor_id() {
          self.dispatch(ViewAction::OpenEdit(id)).await;
        }
      }
      KeyCode::Char('d') | KeyCode::Delete => {
        if let Some(id) = self.cursor_id() {
          self.dispatch(ViewAction::OpenDelete(id)).await;
        }
      }
      KeyCode::Char('t') => {
        if let Some(id) = self.cursor_id() {
          self.dispatch(ViewAction::ToggleStatus(id)).await;
        }
      }

      // Dialogs
      KeyCode::Char('x') => self.dispatch(ViewAction::OpenExport).await,
      KeyCode::Char('c') => self.dispatch(ViewAction::OpenColumns).await,
      KeyCode::Char('s') => {
        self
          .dispatch(ViewAction::OpenSettings(self.database_url.clone()))
          .await
      }
      KeyCode::Char('T') => self.write_template().await,

      _ => {}
    }
    self.clamp_cursors();
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    let Some(form) = self.view.dialog.form() else {
      return;
    };
    let field = self.form_field;
    let change = match key.code {
      KeyCode::Esc => return self.dispatch(ViewAction::Cancel).await,
      KeyCode::Enter => return self.dispatch(ViewAction::Submit).await,
      KeyCode::Tab | KeyCode::Down => return self.move_form_focus(true),
      KeyCode::BackTab | KeyCode::Up => return self.move_form_focus(false),
      KeyCode::Right => input::cycle(form, field, true),
      KeyCode::Left => input::cycle(form, field, false),
      KeyCode::Char(' ') if input::text_change(field, String::new()).is_none() => {
        input::cycle(form, field, true)
      }
      KeyCode::Char(c) => input::push_char(form, field, c),
      KeyCode::Backspace => input::pop_char(form, field),
      _ => None,
    };
    if let Some(change) = change {
      self.dispatch(ViewAction::EditField(change)).await;
    }
  }

  fn move_form_focus(&mut self, forward: bool) {
    let fields: Vec<FormField> = FormField::iter().filter(|f| input::is_editable(*f)).collect();
    let len = fields.len();
    let index = fields.iter().position(|f| *f == self.form_field).unwrap_or(0);
    let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
    self.form_field = fields[next];
  }

  async fn handle_menu_key(&mut self, key: KeyEvent, len: usize) {
    match key.code {
      KeyCode::Esc => self.dispatch(ViewAction::Cancel).await,
      KeyCode::Down | KeyCode::Char('j') => {
        self.menu_cursor = (self.menu_cursor + 1).min(len.saturating_sub(1))
      }
      KeyCode::Up | KeyCode::Char('k') => self.menu_cursor = self.menu_cursor.saturating_sub(1),
      KeyCode::Enter | KeyCode::Char(' ') => match self.view.dialog {
        Dialog::Export => {
          if let Some(format) = EXPORT_FORMATS.get(self.menu_cursor).copied() {
            self.dispatch(ViewAction::ChooseExport(format)).await;
          }
        }
        Dialog::Columns => {
          if let Some(column) = Column::all().nth(self.menu_cursor) {
            self.dispatch(ViewAction::ToggleColumn(column)).await;
          }
        }
        _ => {}
      },
      KeyCode::Char('a') if self.view.dialog == Dialog::Columns => {
        self.dispatch(ViewAction::ShowAllColumns).await
      }
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn app(dir: &std::path::Path) -> App {
    let store = SqliteStore::open_in_memory().await.unwrap();
    App::new(store, Roster::default(), None, dir.to_path_buf())
  }

  async fn press(app: &mut App, keys: &str) {
    for c in keys.chars() {
      app.handle_key(KeyEvent::from(KeyCode::Char(c))).await.unwrap();
    }
  }

  async fn key(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::from(code)).await.unwrap();
  }

  /// Fill the add form through the keyboard and submit it.
  async fn add_record(app: &mut App, registry: &str) {
    press(app, "n").await;
    press(app, registry).await;
    key(app, KeyCode::Tab).await;
    press(app, "Ayşe Yılmaz").await;
    key(app, KeyCode::Tab).await;
    // Title: Inspector is the third rank.
    for _ in 0..3 {
      key(app, KeyCode::Right).await;
    }
    key(app, KeyCode::Tab).await;
    press(app, "17").await;
    key(app, KeyCode::Tab).await;
    for _ in 0..2 {
      key(app, KeyCode::Right).await;
    }
    key(app, KeyCode::Tab).await; // division
    key(app, KeyCode::Tab).await;
    press(app, "2018-01-02").await;
    key(app, KeyCode::Tab).await; // termination date
    key(app, KeyCode::Tab).await;
    press(app, "2018-01-02").await;
    key(app, KeyCode::Tab).await; // banking absence
    key(app, KeyCode::Tab).await;
    press(app, "2020-03-10").await;
    key(app, KeyCode::Enter).await;
  }

  #[tokio::test]
  async fn add_through_keyboard_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path()).await;
    add_record(&mut app, "1001").await;

    assert!(app.view.dialog.is_idle(), "status: {}", app.status_msg);
    assert_eq!(app.roster.len(), 1);
    let stored = app.store.load_roster().await.unwrap();
    assert_eq!(stored, app.roster);
    assert_eq!(stored.records()[0].registry_number, "1001");
  }

  #[tokio::test]
  async fn duplicate_add_keeps_form_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path()).await;
    add_record(&mut app, "1001").await;
    add_record(&mut app, "1001").await;

    assert!(app.view.dialog.form().is_some());
    assert_eq!(app.roster.len(), 1);
    key(&mut app, KeyCode::Esc).await;
    assert!(app.view.dialog.is_idle());
  }

  #[tokio::test]
  async fn delete_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path()).await;
    add_record(&mut app, "1001").await;

    press(&mut app, "dn").await;
    assert_eq!(app.roster.len(), 1);
    press(&mut app, "dy").await;
    assert!(app.roster.is_empty());
    assert!(app.store.load_roster().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn toggled_record_leaves_active_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path()).await;
    add_record(&mut app, "1001").await;

    press(&mut app, "t").await;
    assert!(app.rows().is_empty());
    assert_eq!(app.roster.records()[0].termination_date, Some(today()));
    press(&mut app, "a").await;
    assert_eq!(app.rows().len(), 1);
  }

  #[tokio::test]
  async fn export_writes_file_and_closes_dialog() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path()).await;
    add_record(&mut app, "1001").await;

    press(&mut app, "x").await;
    key(&mut app, KeyCode::Down).await;
    key(&mut app, KeyCode::Enter).await;

    assert!(app.view.dialog.is_idle());
    let html = std::fs::read_to_string(dir.path().join("personnel-list.html")).unwrap();
    assert!(html.contains("Ayşe Yılmaz"));
  }

  #[tokio::test]
  async fn search_filters_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path()).await;
    add_record(&mut app, "1001").await;

    press(&mut app, "/yilmaz").await;
    assert_eq!(app.rows().len(), 1);
    press(&mut app, "x").await;
    assert!(app.rows().is_empty());
    key(&mut app, KeyCode::Esc).await;
    assert!(!app.search_active);
    assert_eq!(app.rows().len(), 1);
  }

  #[tokio::test]
  async fn settings_saves_database_url() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path()).await;

    press(&mut app, "s").await;
    press(&mut app, "sqlite://x").await;
    key(&mut app, KeyCode::Enter).await;

    assert_eq!(app.database_url.as_deref(), Some("sqlite://x"));
    assert_eq!(app.store.database_url().await.unwrap().as_deref(), Some("sqlite://x"));
    assert_eq!(app.status_msg, "Database URL saved");

    press(&mut app, "s").await;
    for _ in 0.."sqlite://x".len() {
      key(&mut app, KeyCode::Backspace).await;
    }
    key(&mut app, KeyCode::Enter).await;

    assert_eq!(app.database_url, None);
    assert_eq!(app.status_msg, "Database URL cleared");
  }
}
