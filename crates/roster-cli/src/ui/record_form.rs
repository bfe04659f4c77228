//! The add / edit record popup.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};
use roster_core::{
  ValidationError,
  form::{FieldKind, FormField, RecordForm},
  roster::Roster,
};
use strum::IntoEnumIterator;

use crate::{app::App, input, ui::centered};

const LABEL_WIDTH: usize = 38;

pub fn draw(f: &mut Frame, area: Rect, app: &App, form: &RecordForm) {
  let title = if form.is_editing() { " Personeli Düzenle " } else { " Yeni Personel " };

  let mut lines: Vec<Line> = Vec::new();
  for field in FormField::iter() {
    lines.push(field_line(form, field, field == app.form_field));

    if let Some(message) = field_message(form, field, &app.roster) {
      lines.push(Line::from(Span::styled(
        format!("{:LABEL_WIDTH$}  ! {message}", ""),
        Style::default().fg(Color::Red),
      )));
    }
  }

  let height = lines.len() as u16 + 2;
  let popup = centered(area, 90, height);
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(lines).block(block), popup);
}

/// The error shown under `field`: the last submit's error, or the live
/// duplicate check while a new registry number is typed.
fn field_message(form: &RecordForm, field: FormField, roster: &Roster) -> Option<String> {
  match form.error_for(field) {
    Some(error) => Some(error.to_string()),
    None if field == FormField::RegistryNumber && form.registry_number_taken(roster) => Some(
      ValidationError::DuplicateRegistryNumber(form.registry_number.trim().to_owned()).to_string(),
    ),
    None => None,
  }
}

fn field_line(form: &RecordForm, field: FormField, focused: bool) -> Line<'static> {
  let value = input::field_text(form, field);
  let kind = field.kind();

  let shown = match kind {
    FieldKind::Choice if focused => format!("‹ {value} ›"),
    FieldKind::Text | FieldKind::Date | FieldKind::Days if focused => format!("{value}_"),
    _ => value,
  };

  let label_style = if focused {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Gray)
  };
  let value_style = match kind {
    FieldKind::Derived => Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    _ if focused => Style::default().fg(Color::White).bg(Color::Blue),
    _ => Style::default(),
  };

  Line::from(vec![
    Span::styled(format!("{:LABEL_WIDTH$}  ", field.label()), label_style),
    Span::styled(shown, value_style),
  ])
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use roster_core::{
    form::FieldChange,
    record::{Department, Title},
  };

  use super::*;

  fn roster_with(registry_number: &str) -> Roster {
    let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let form = [
      FieldChange::RegistryNumber(registry_number.into()),
      FieldChange::FullName("Ali Veli".into()),
      FieldChange::Title(Some(Title::Inspector)),
      FieldChange::Department(Some(Department::BankingAudits)),
      FieldChange::HireDate("2019-05-06".into()),
      FieldChange::BankingSeniorityStartDate("2019-05-06".into()),
      FieldChange::AuditSeniorityStartDate("2019-05-06".into()),
    ]
    .into_iter()
    .fold(RecordForm::new(), |form, change| form.apply(change, today));
    let record = form.validate(&Roster::default()).unwrap();
    Roster::new(vec![record])
  }

  #[test]
  fn live_duplicate_warning_matches_submit_error() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let roster = roster_with("1001");
    let form = RecordForm::new().apply(FieldChange::RegistryNumber(" 1001 ".into()), today);

    assert_eq!(
      field_message(&form, FormField::RegistryNumber, &roster),
      Some(ValidationError::DuplicateRegistryNumber("1001".into()).to_string())
    );
    assert_eq!(field_message(&form, FormField::FullName, &roster), None);

    let fresh = RecordForm::new().apply(FieldChange::RegistryNumber("1002".into()), today);
    assert_eq!(field_message(&fresh, FormField::RegistryNumber, &roster), None);
  }

  #[test]
  fn submit_errors_take_precedence() {
    let mut form = RecordForm::new();
    form.errors = vec![ValidationError::Required(FormField::FullName)];
    assert_eq!(
      field_message(&form, FormField::FullName, &Roster::default()),
      Some(ValidationError::Required(FormField::FullName).to_string())
    );
  }
}
