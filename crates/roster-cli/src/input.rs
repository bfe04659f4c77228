//! Maps keystrokes on the record form to [`FieldChange`]s.

use roster_core::{
  form::{FieldChange, FieldKind, FormField, RecordForm},
  record::{Department, Eligibility, Title, TriState},
};
use strum::IntoEnumIterator;

/// Current value of `field` as shown in the form.
pub fn field_text(form: &RecordForm, field: FormField) -> String {
  match field {
    FormField::RegistryNumber => form.registry_number.clone(),
    FormField::FullName => form.full_name.clone(),
    FormField::Title => form.title.map(|t| t.label().to_owned()).unwrap_or_default(),
    FormField::SealNumber => form.seal_number.to_string(),
    FormField::Department => form.department.map(|d| d.label().to_owned()).unwrap_or_default(),
    FormField::Division => form.division.to_string(),
    FormField::HireDate => form.hire_date.clone(),
    FormField::TerminationDate => form.termination_date.clone(),
    FormField::BankingSeniorityStartDate => form.banking_seniority_start_date.clone(),
    FormField::BankingAbsenceDays => form.banking_absence_days.clone(),
    FormField::AuditSeniorityStartDate => form.audit_seniority_start_date.clone(),
    FormField::AuditAbsenceDays => form.audit_absence_days.clone(),
    FormField::BankingSeniorityYears => format!("{:.2}", form.banking_seniority_years),
    FormField::AuditSeniorityYears => format!("{:.2}", form.audit_seniority_years),
    FormField::PromotionBonusDays => form.promotion_bonus_days.clone(),
    FormField::NextPromotionDate => match form.next_promotion_date {
      TriState::Value(date) => date.format(roster_core::rules::DISPLAY_DATE).to_string(),
      other => other.to_string(),
    },
    FormField::PromotionEligible => form.promotion_eligible.to_string(),
    FormField::Status => form.status.label().to_owned(),
  }
}

/// The change produced by replacing a free-text field's content with
/// `text`. `None` for choice and derived fields.
pub fn text_change(field: FormField, text: String) -> Option<FieldChange> {
  let change = match field {
    FormField::RegistryNumber => FieldChange::RegistryNumber(text),
    FormField::FullName => FieldChange::FullName(text),
    FormField::SealNumber => FieldChange::SealNumber(text),
    FormField::HireDate => FieldChange::HireDate(text),
    FormField::TerminationDate => FieldChange::TerminationDate(text),
    FormField::BankingSeniorityStartDate => FieldChange::BankingSeniorityStartDate(text),
    FormField::BankingAbsenceDays => FieldChange::BankingAbsenceDays(text),
    FormField::AuditSeniorityStartDate => FieldChange::AuditSeniorityStartDate(text),
    FormField::AuditAbsenceDays => FieldChange::AuditAbsenceDays(text),
    FormField::PromotionBonusDays => FieldChange::PromotionBonusDays(text),
    _ => return None,
  };
  Some(change)
}

/// Type `c` into `field`.
pub fn push_char(form: &RecordForm, field: FormField, c: char) -> Option<FieldChange> {
  let mut text = field_text(form, field);
  text.push(c);
  text_change(field, text)
}

/// Delete the last character of `field`.
pub fn pop_char(form: &RecordForm, field: FormField) -> Option<FieldChange> {
  let mut text = field_text(form, field);
  text.pop();
  text_change(field, text)
}

/// Step a choice field to its next (or previous) option.
pub fn cycle(form: &RecordForm, field: FormField, forward: bool) -> Option<FieldChange> {
  match field {
    FormField::Title => {
      let next = step(&Title::iter().collect::<Vec<_>>(), form.title, forward);
      Some(FieldChange::Title(Some(next)))
    }
    FormField::Department => {
      let next = step(&Department::iter().collect::<Vec<_>>(), form.department, forward);
      Some(FieldChange::Department(Some(next)))
    }
    FormField::Division => {
      let options = form.division_options();
      if options.is_empty() {
        return None;
      }
      let current = form
        .division
        .value()
        .and_then(|d| options.iter().copied().find(|o| *o == d.as_str()));
      Some(FieldChange::Division(step(&options, current, forward).to_owned()))
    }
    FormField::PromotionEligible => {
      let next = match form.promotion_eligible {
        TriState::Value(Eligibility::Yes) => Eligibility::No,
        _ => Eligibility::Yes,
      };
      Some(FieldChange::PromotionEligible(next))
    }
    FormField::Status => Some(FieldChange::Status(form.status.toggled())),
    _ => None,
  }
}

fn step<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> T {
  let len = options.len();
  let index = match current.and_then(|c| options.iter().position(|o| *o == c)) {
    Some(i) if forward => (i + 1) % len,
    Some(i) => (i + len - 1) % len,
    None if forward => 0,
    None => len - 1,
  };
  options[index]
}

pub fn is_editable(field: FormField) -> bool { field.kind() != FieldKind::Derived }

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 10, 15).unwrap() }

  #[test]
  fn typing_builds_up_text() {
    let form = RecordForm::new();
    let change = push_char(&form, FormField::FullName, 'A').unwrap();
    let form = form.apply(change, today());
    let change = push_char(&form, FormField::FullName, 'y').unwrap();
    let form = form.apply(change, today());
    assert_eq!(form.full_name, "Ay");

    let change = pop_char(&form, FormField::FullName).unwrap();
    let form = form.apply(change, today());
    assert_eq!(form.full_name, "A");
  }

  #[test]
  fn derived_fields_reject_typing() {
    let form = RecordForm::new();
    assert!(push_char(&form, FormField::AuditSeniorityYears, '1').is_none());
    assert!(!is_editable(FormField::NextPromotionDate));
  }

  #[test]
  fn cycling_wraps_around() {
    let form = RecordForm::new();
    assert_eq!(
      cycle(&form, FormField::Title, true),
      Some(FieldChange::Title(Some(Title::AssistantInspector)))
    );
    assert_eq!(
      cycle(&form, FormField::Title, false),
      Some(FieldChange::Title(Some(Title::Chair)))
    );

    let form = form.apply(FieldChange::Title(Some(Title::Chair)), today());
    assert_eq!(
      cycle(&form, FormField::Title, true),
      Some(FieldChange::Title(Some(Title::AssistantInspector)))
    );
  }

  #[test]
  fn division_cycles_within_department() {
    let form = RecordForm::new().apply(
      FieldChange::Department(Some(Department::InformationSystemsAudits)),
      today(),
    );
    let first = cycle(&form, FormField::Division, true).unwrap();
    assert_eq!(first, FieldChange::Division("BS Merkezi Denetimler ve İnceleme".into()));

    let form = form.apply(first, today());
    assert_eq!(
      cycle(&form, FormField::Division, true),
      Some(FieldChange::Division("Bilgi Sistemleri Süreç Denetimleri".into()))
    );

    let chair = RecordForm::new().apply(
      FieldChange::Department(Some(Department::InspectionBoardChairmanship)),
      today(),
    );
    assert_eq!(cycle(&chair, FormField::Division, true), None);
  }
}
