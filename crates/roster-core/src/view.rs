//! View state of the roster screen and its pure transition function.
//!
//! A [`ViewState`] is the query plus whichever dialog is open. Every user
//! action goes through [`ViewState::reduce`], which returns the next state
//! and, when the action has to touch the roster, the store or the file
//! system, an [`Effect`] for the host to carry out.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  column::Column,
  export::ExportFormat,
  form::{FieldChange, FormMode, RecordForm},
  query::RosterQuery,
  record::PersonnelRecord,
  roster::Roster,
};

/// The one dialog open over the table, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dialog {
  #[default]
  Idle,
  Add(RecordForm),
  Edit(RecordForm),
  DeleteConfirm(Uuid),
  Export,
  Columns,
  Settings {
    database_url: String,
  },
}

impl Dialog {
  pub fn is_idle(&self) -> bool { matches!(self, Self::Idle) }

  pub fn form(&self) -> Option<&RecordForm> {
    match self {
      Self::Add(form) | Self::Edit(form) => Some(form),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
  Search(String),
  ToggleActiveOnly,
  SortBy(Column),
  ToggleColumn(Column),
  ShowAllColumns,

  OpenAdd,
  OpenEdit(Uuid),
  OpenDelete(Uuid),
  OpenExport,
  OpenColumns,
  /// Carries the currently stored URL to pre-fill the input.
  OpenSettings(Option<String>),

  EditField(FieldChange),
  Submit,
  ConfirmDelete,
  ChooseExport(ExportFormat),
  /// The host finished writing the export file.
  ExportFinished,
  SettingsInput(String),
  SaveSettings,
  /// Quick active/inactive flip from the table.
  ToggleStatus(Uuid),
  Cancel,
}

/// Work the host performs after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
  Commit {
    mode:   FormMode,
    record: PersonnelRecord,
  },
  Delete(Uuid),
  ToggleStatus(Uuid),
  Export(ExportFormat),
  SaveDatabaseUrl(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
  pub query:  RosterQuery,
  pub dialog: Dialog,
}

impl ViewState {
  pub fn reduce(
    self,
    action: ViewAction,
    roster: &Roster,
    today: NaiveDate,
  ) -> (ViewState, Option<Effect>) {
    let Self { mut query, dialog } = self;

    match action {
      // ── Query ─────────────────────────────────────────────────────────
      ViewAction::Search(text) => query.search = text,
      ViewAction::ToggleActiveOnly => query.active_only = !query.active_only,
      ViewAction::SortBy(column) => query.sort = query.sort.select(column),
      ViewAction::ToggleColumn(column) => query.columns = query.columns.toggle(column),
      ViewAction::ShowAllColumns => query.columns = query.columns.show_all(),

      // ── Opening dialogs ───────────────────────────────────────────────
      action @ (ViewAction::OpenAdd
      | ViewAction::OpenEdit(_)
      | ViewAction::OpenDelete(_)
      | ViewAction::OpenExport
      | ViewAction::OpenColumns
      | ViewAction::OpenSettings(_)) => {
        let dialog = match dialog {
          Dialog::Idle => open(action, roster, today),
          busy => busy,
        };
        return (Self { query, dialog }, None);
      }

      ViewAction::ToggleStatus(id) if dialog.is_idle() && roster.get(id).is_some() => {
        return (Self { query, dialog }, Some(Effect::ToggleStatus(id)));
      }

      // ── Inside dialogs ────────────────────────────────────────────────
      action => return transition(query, dialog, action, roster, today),
    }

    (Self { query, dialog }, None)
  }
}

fn open(action: ViewAction, roster: &Roster, today: NaiveDate) -> Dialog {
  match action {
    ViewAction::OpenAdd => Dialog::Add(RecordForm::new()),
    ViewAction::OpenEdit(id) => roster
      .get(id)
      .map_or(Dialog::Idle, |r| Dialog::Edit(RecordForm::edit(r, today))),
    ViewAction::OpenDelete(id) if roster.get(id).is_some() => Dialog::DeleteConfirm(id),
    ViewAction::OpenExport => Dialog::Export,
    ViewAction::OpenColumns => Dialog::Columns,
    ViewAction::OpenSettings(url) => Dialog::Settings { database_url: url.unwrap_or_default() },
    _ => Dialog::Idle,
  }
}

fn transition(
  query: RosterQuery,
  dialog: Dialog,
  action: ViewAction,
  roster: &Roster,
  today: NaiveDate,
) -> (ViewState, Option<Effect>) {
  let (dialog, effect) = match (dialog, action) {
    (_, ViewAction::Cancel) => (Dialog::Idle, None),

    (Dialog::Add(form), ViewAction::EditField(change)) => {
      (Dialog::Add(form.apply(change, today)), None)
    }
    (Dialog::Edit(form), ViewAction::EditField(change)) => {
      (Dialog::Edit(form.apply(change, today)), None)
    }

    (Dialog::Add(form) | Dialog::Edit(form), ViewAction::Submit) => submit(form, roster),

    (Dialog::DeleteConfirm(id), ViewAction::ConfirmDelete) => {
      (Dialog::Idle, Some(Effect::Delete(id)))
    }

    (Dialog::Export, ViewAction::ChooseExport(format)) => {
      (Dialog::Export, Some(Effect::Export(format)))
    }
    (Dialog::Export, ViewAction::ExportFinished) => (Dialog::Idle, None),

    (Dialog::Settings { .. }, ViewAction::SettingsInput(database_url)) => {
      (Dialog::Settings { database_url }, None)
    }
    (Dialog::Settings { database_url }, ViewAction::SaveSettings) => {
      let url = database_url.trim();
      let url = (!url.is_empty()).then(|| url.to_owned());
      (Dialog::Idle, Some(Effect::SaveDatabaseUrl(url)))
    }

    (dialog, _) => (dialog, None),
  };
  (ViewState { query, dialog }, effect)
}

/// Validate and close, or keep the form open with its errors.
fn submit(mut form: RecordForm, roster: &Roster) -> (Dialog, Option<Effect>) {
  match form.validate(roster) {
    Ok(record) => (Dialog::Idle, Some(Effect::Commit { mode: form.mode, record })),
    Err(errors) => {
      form.errors = errors;
      let dialog = match form.mode {
        FormMode::Create => Dialog::Add(form),
        FormMode::Edit(_) => Dialog::Edit(form),
      };
      (dialog, None)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    ValidationError,
    record::{Department, Title, tests::sample},
  };

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 10, 15).unwrap() }

  fn run(
    state: ViewState,
    actions: impl IntoIterator<Item = ViewAction>,
    roster: &Roster,
  ) -> (ViewState, Vec<Effect>) {
    let mut effects = Vec::new();
    let state = actions.into_iter().fold(state, |state, action| {
      let (next, effect) = state.reduce(action, roster, today());
      effects.extend(effect);
      next
    });
    (state, effects)
  }

  fn fill(registry: &str) -> Vec<ViewAction> {
    [
      FieldChange::RegistryNumber(registry.into()),
      FieldChange::FullName("Ali Veli".into()),
      FieldChange::Title(Some(Title::Inspector)),
      FieldChange::SealNumber("5".into()),
      FieldChange::Department(Some(Department::BankingAudits)),
      FieldChange::HireDate("2019-05-06".into()),
      FieldChange::BankingSeniorityStartDate("2019-05-06".into()),
      FieldChange::AuditSeniorityStartDate("2019-05-06".into()),
    ]
    .into_iter()
    .map(ViewAction::EditField)
    .collect()
  }

  #[test]
  fn add_flow_commits_and_closes() {
    let roster = Roster::default();
    let mut actions = vec![ViewAction::OpenAdd];
    actions.extend(fill("1001"));
    actions.push(ViewAction::Submit);

    let (state, effects) = run(ViewState::default(), actions, &roster);
    assert!(state.dialog.is_idle());
    match effects.as_slice() {
      [Effect::Commit { mode: FormMode::Create, record }] => {
        assert_eq!(record.registry_number, "1001");
        assert_eq!(
          record.next_promotion_date.value().map(ToString::to_string).as_deref(),
          Some("2024-05-06")
        );
      }
      other => panic!("unexpected effects: {other:?}"),
    }
  }

  #[test]
  fn duplicate_on_create_keeps_dialog_open() {
    let roster = Roster::new(vec![sample("1001", Title::Inspector)]);
    let mut actions = vec![ViewAction::OpenAdd];
    actions.extend(fill("1001"));
    actions.push(ViewAction::Submit);

    let (state, effects) = run(ViewState::default(), actions, &roster);
    assert!(effects.is_empty());
    let form = state.dialog.form().unwrap();
    assert_eq!(
      form.errors,
      vec![ValidationError::DuplicateRegistryNumber("1001".into())]
    );
  }

  #[test]
  fn edit_keeping_own_registry_number_succeeds() {
    let record = sample("1001", Title::Inspector);
    let id = record.id;
    let roster = Roster::new(vec![record]);

    let (state, effects) = run(
      ViewState::default(),
      [
        ViewAction::OpenEdit(id),
        ViewAction::EditField(FieldChange::FullName("Yeni".into())),
        ViewAction::Submit,
      ],
      &roster,
    );
    assert!(state.dialog.is_idle());
    assert!(matches!(
      effects.as_slice(),
      [Effect::Commit { mode: FormMode::Edit(edited), record }]
        if *edited == id && record.full_name == "Yeni"
    ));
  }

  #[test]
  fn delete_needs_confirmation() {
    let record = sample("1001", Title::Inspector);
    let id = record.id;
    let roster = Roster::new(vec![record]);

    let (state, effects) = run(
      ViewState::default(),
      [ViewAction::OpenDelete(id), ViewAction::Cancel],
      &roster,
    );
    assert!(state.dialog.is_idle());
    assert!(effects.is_empty());

    let (_, effects) = run(
      ViewState::default(),
      [ViewAction::OpenDelete(id), ViewAction::ConfirmDelete],
      &roster,
    );
    assert_eq!(effects, vec![Effect::Delete(id)]);
  }

  #[test]
  fn only_one_dialog_at_a_time() {
    let record = sample("1001", Title::Inspector);
    let id = record.id;
    let roster = Roster::new(vec![record]);

    let (state, effects) = run(
      ViewState::default(),
      [
        ViewAction::OpenExport,
        ViewAction::OpenAdd,
        ViewAction::OpenDelete(id),
        ViewAction::ToggleStatus(id),
      ],
      &roster,
    );
    assert_eq!(state.dialog, Dialog::Export);
    assert!(effects.is_empty());
  }

  #[test]
  fn export_stays_open_until_finished() {
    let roster = Roster::default();
    let (state, effects) = run(
      ViewState::default(),
      [ViewAction::OpenExport, ViewAction::ChooseExport(ExportFormat::Document)],
      &roster,
    );
    assert_eq!(state.dialog, Dialog::Export);
    assert_eq!(effects, vec![Effect::Export(ExportFormat::Document)]);

    let (state, _) = state.reduce(ViewAction::ExportFinished, &roster, today());
    assert!(state.dialog.is_idle());
  }

  #[test]
  fn settings_blank_url_clears() {
    let roster = Roster::default();
    let (_, effects) = run(
      ViewState::default(),
      [
        ViewAction::OpenSettings(Some("postgres://old".into())),
        ViewAction::SettingsInput("  ".into()),
        ViewAction::SaveSettings,
      ],
      &roster,
    );
    assert_eq!(effects, vec![Effect::SaveDatabaseUrl(None)]);
  }

  #[test]
  fn query_actions_update_state() {
    let roster = Roster::default();
    let (state, _) = run(
      ViewState::default(),
      [
        ViewAction::Search("müfettiş".into()),
        ViewAction::ToggleActiveOnly,
        ViewAction::SortBy(Column::FullName),
        ViewAction::ToggleColumn(Column::SealNumber),
      ],
      &roster,
    );
    assert_eq!(state.query.search, "müfettiş");
    assert!(!state.query.active_only);
    assert_eq!(state.query.sort.primary.column, Column::FullName);
    assert_eq!(state.query.sort.secondary.column, Column::Title);
    assert!(!state.query.columns.is_visible(Column::SealNumber));
  }

  #[test]
  fn toggle_status_from_idle_emits_effect() {
    let record = sample("1001", Title::Inspector);
    let id = record.id;
    let roster = Roster::new(vec![record]);
    let (_, effects) = run(ViewState::default(), [ViewAction::ToggleStatus(id)], &roster);
    assert_eq!(effects, vec![Effect::ToggleStatus(id)]);
  }
}
