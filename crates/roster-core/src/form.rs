//! The record form: raw user input plus live derived fields.
//!
//! All edits go through [`RecordForm::apply`], a single reducer that takes
//! the field that changed, re-runs the rules depending on it, and then
//! re-enforces the title constraints. Derived fields are therefore always
//! current while the form is open, never only at save time.

use std::fmt;

use chrono::NaiveDate;
use strum::EnumIter;
use uuid::Uuid;

use crate::{
  ValidationError,
  record::{Department, Eligibility, PersonnelRecord, Status, Title, TriState},
  roster::Roster,
  rules::{self, TerminationUpdate},
};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// Every field shown on the record form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum FormField {
  RegistryNumber,
  FullName,
  Title,
  SealNumber,
  Department,
  Division,
  HireDate,
  TerminationDate,
  BankingSeniorityStartDate,
  BankingAbsenceDays,
  AuditSeniorityStartDate,
  AuditAbsenceDays,
  BankingSeniorityYears,
  AuditSeniorityYears,
  PromotionBonusDays,
  NextPromotionDate,
  PromotionEligible,
  Status,
}

/// How a form field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  Date,
  Days,
  /// Picked from a fixed option list.
  Choice,
  /// Computed by the rule engine; read-only.
  Derived,
}

impl FormField {
  pub fn label(self) -> &'static str {
    match self {
      Self::RegistryNumber => "Sicil No",
      Self::FullName => "Ad Soyad",
      Self::Title => "Unvan",
      Self::SealNumber => "Mühür No",
      Self::Department => "Birim",
      Self::Division => "Servis",
      Self::HireDate => "İşe Giriş Tarihi",
      Self::TerminationDate => "İşten Çıkış Tarihi",
      Self::BankingSeniorityStartDate => "Bankacılık Kıdemi Başlangıç Tarihi",
      Self::BankingAbsenceDays => "Ayrı Kalınan Süre (Bankacılık, Gün)",
      Self::AuditSeniorityStartDate => "Denetim Kıdemi Başlangıç Tarihi",
      Self::AuditAbsenceDays => "Ayrı Kalınan Süre (Denetim, Gün)",
      Self::BankingSeniorityYears => "Bankacılık Kıdemi (Yıl)",
      Self::AuditSeniorityYears => "Denetim Kıdemi (Yıl)",
      Self::PromotionBonusDays => "Terfiye Eklenecek Süre (Gün)",
      Self::NextPromotionDate => "Sonraki Terfi Tarihi",
      Self::PromotionEligible => "Terfiye Uygun",
      Self::Status => "Durum",
    }
  }

  pub fn kind(self) -> FieldKind {
    match self {
      Self::RegistryNumber | Self::FullName | Self::SealNumber => FieldKind::Text,
      Self::HireDate
      | Self::TerminationDate
      | Self::BankingSeniorityStartDate
      | Self::AuditSeniorityStartDate => FieldKind::Date,
      Self::BankingAbsenceDays | Self::AuditAbsenceDays | Self::PromotionBonusDays => {
        FieldKind::Days
      }
      Self::Title
      | Self::Department
      | Self::Division
      | Self::PromotionEligible
      | Self::Status => FieldKind::Choice,
      Self::BankingSeniorityYears | Self::AuditSeniorityYears | Self::NextPromotionDate => {
        FieldKind::Derived
      }
    }
  }
}

impl fmt::Display for FormField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// A single user edit, carrying the new raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
  RegistryNumber(String),
  FullName(String),
  Title(Option<Title>),
  SealNumber(String),
  Department(Option<Department>),
  Division(String),
  HireDate(String),
  TerminationDate(String),
  BankingSeniorityStartDate(String),
  BankingAbsenceDays(String),
  AuditSeniorityStartDate(String),
  AuditAbsenceDays(String),
  PromotionBonusDays(String),
  PromotionEligible(Eligibility),
  Status(Status),
}

impl FieldChange {
  pub fn field(&self) -> FormField {
    match self {
      Self::RegistryNumber(_) => FormField::RegistryNumber,
      Self::FullName(_) => FormField::FullName,
      Self::Title(_) => FormField::Title,
      Self::SealNumber(_) => FormField::SealNumber,
      Self::Department(_) => FormField::Department,
      Self::Division(_) => FormField::Division,
      Self::HireDate(_) => FormField::HireDate,
      Self::TerminationDate(_) => FormField::TerminationDate,
      Self::BankingSeniorityStartDate(_) => FormField::BankingSeniorityStartDate,
      Self::BankingAbsenceDays(_) => FormField::BankingAbsenceDays,
      Self::AuditSeniorityStartDate(_) => FormField::AuditSeniorityStartDate,
      Self::AuditAbsenceDays(_) => FormField::AuditAbsenceDays,
      Self::PromotionBonusDays(_) => FormField::PromotionBonusDays,
      Self::PromotionEligible(_) => FormField::PromotionEligible,
      Self::Status(_) => FormField::Status,
    }
  }
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// Whether the form creates a new record or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Create,
  Edit(Uuid),
}

/// Editable state of one record. Dates and day counts are kept as typed
/// text until validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordForm {
  pub mode:                         FormMode,
  pub registry_number:              String,
  pub full_name:                    String,
  pub title:                        Option<Title>,
  pub seal_number:                  TriState<String>,
  pub department:                   Option<Department>,
  pub division:                     TriState<String>,
  pub hire_date:                    String,
  pub termination_date:             String,
  pub banking_seniority_start_date: String,
  pub banking_absence_days:         String,
  pub audit_seniority_start_date:   String,
  pub audit_absence_days:           String,
  pub promotion_bonus_days:         String,
  pub banking_seniority_years:      f64,
  pub audit_seniority_years:        f64,
  pub next_promotion_date:          TriState<NaiveDate>,
  pub promotion_eligible:           TriState<Eligibility>,
  pub status:                       Status,
  /// Errors from the last rejected submit, cleared field by field as the
  /// user edits.
  pub errors:                       Vec<ValidationError>,
}

impl RecordForm {
  /// A blank form for adding a record.
  pub fn new() -> Self {
    Self {
      mode:                         FormMode::Create,
      registry_number:              String::new(),
      full_name:                    String::new(),
      title:                        None,
      seal_number:                  TriState::Empty,
      department:                   None,
      division:                     TriState::Empty,
      hire_date:                    String::new(),
      termination_date:             String::new(),
      banking_seniority_start_date: String::new(),
      banking_absence_days:         "0".into(),
      audit_seniority_start_date:   String::new(),
      audit_absence_days:           "0".into(),
      promotion_bonus_days:         "0".into(),
      banking_seniority_years:      0.0,
      audit_seniority_years:        0.0,
      next_promotion_date:          TriState::Empty,
      promotion_eligible:           TriState::Value(Eligibility::Yes),
      status:                       Status::Active,
      errors:                       Vec::new(),
    }
  }

  /// A form pre-filled from `record`, with every derived field recomputed
  /// against `today`.
  pub fn edit(record: &PersonnelRecord, today: NaiveDate) -> Self {
    let form = Self {
      mode:                         FormMode::Edit(record.id),
      registry_number:              record.registry_number.clone(),
      full_name:                    record.full_name.clone(),
      title:                        Some(record.title),
      seal_number:                  record.seal_number.clone(),
      department:                   Some(record.department),
      division:                     record.division.clone(),
      hire_date:                    rules::format_iso(record.hire_date),
      termination_date:             record
        .termination_date
        .map(rules::format_iso)
        .unwrap_or_default(),
      banking_seniority_start_date: rules::format_iso(record.banking_seniority_start_date),
      banking_absence_days:         record.banking_absence_days.to_string(),
      audit_seniority_start_date:   rules::format_iso(record.audit_seniority_start_date),
      audit_absence_days:           record.audit_absence_days.to_string(),
      promotion_bonus_days:         record.promotion_bonus_days.to_string(),
      banking_seniority_years:      record.banking_seniority_years,
      audit_seniority_years:        record.audit_seniority_years,
      next_promotion_date:          record.next_promotion_date,
      promotion_eligible:           record.promotion_eligible,
      status:                       record.status,
      errors:                       Vec::new(),
    };
    form.refresh(today)
  }

  pub fn is_editing(&self) -> bool { matches!(self.mode, FormMode::Edit(_)) }

  /// Recompute every derived field and normalise title sentinels.
  pub fn refresh(mut self, today: NaiveDate) -> Self {
    self.recompute_banking(today);
    self.recompute_audit(today);
    self.recompute_promotion();
    self.status = rules::status_for_termination(self.has_termination());
    self.enforce_title_rules(true);
    self
  }

  /// Apply one user edit and every rule that depends on it.
  pub fn apply(mut self, change: FieldChange, today: NaiveDate) -> Self {
    let field = change.field();
    let mut title_changed = false;

    match change {
      FieldChange::RegistryNumber(v) => self.registry_number = v,
      FieldChange::FullName(v) => self.full_name = v,
      FieldChange::Title(title) => {
        title_changed = self.title != title;
        self.title = title;
        self.recompute_promotion();
      }
      FieldChange::SealNumber(v) => self.seal_number = TriState::from_text(v),
      FieldChange::Department(department) => {
        if self.department != department {
          self.division = TriState::Empty;
        }
        self.department = department;
      }
      FieldChange::Division(v) => self.division = TriState::from_text(v),
      FieldChange::HireDate(v) => self.hire_date = v,
      FieldChange::TerminationDate(v) => {
        self.termination_date = v;
        self.status = rules::status_for_termination(self.has_termination());
      }
      FieldChange::BankingSeniorityStartDate(v) => {
        self.banking_seniority_start_date = v;
        self.recompute_banking(today);
      }
      FieldChange::BankingAbsenceDays(v) => {
        self.banking_absence_days = v;
        self.recompute_banking(today);
      }
      FieldChange::AuditSeniorityStartDate(v) => {
        self.audit_seniority_start_date = v;
        self.recompute_audit(today);
        self.recompute_promotion();
      }
      FieldChange::AuditAbsenceDays(v) => {
        self.audit_absence_days = v;
        self.recompute_audit(today);
      }
      FieldChange::PromotionBonusDays(v) => {
        self.promotion_bonus_days = v;
        self.recompute_promotion();
      }
      FieldChange::PromotionEligible(e) => self.promotion_eligible = TriState::Value(e),
      FieldChange::Status(status) => {
        self.status = status;
        match rules::termination_for_status(status, self.has_termination(), today) {
          TerminationUpdate::Keep => {}
          TerminationUpdate::Set(date) => self.termination_date = rules::format_iso(date),
          TerminationUpdate::Clear => self.termination_date.clear(),
        }
      }
    }

    self.enforce_title_rules(title_changed);
    self.errors.retain(|e| e.field() != field);
    self
  }

  /// Division options for the picker, given the current title and
  /// department.
  pub fn division_options(&self) -> Vec<&'static str> {
    match (self.title, self.department) {
      (Some(t), _) if !t.division_applies() => vec![crate::record::NOT_APPLICABLE],
      (_, Some(d)) => d.divisions().to_vec(),
      (_, None) => Vec::new(),
    }
  }

  /// Live duplicate check shown while typing a registry number on create.
  pub fn registry_number_taken(&self, roster: &Roster) -> bool {
    self.mode == FormMode::Create
      && !self.registry_number.trim().is_empty()
      && roster.contains_registry_number(self.registry_number.trim())
  }

  pub fn error_for(&self, field: FormField) -> Option<&ValidationError> {
    self.errors.iter().find(|e| e.field() == field)
  }

  /// Check the form against `roster` and build the record to commit.
  pub fn validate(&self, roster: &Roster) -> Result<PersonnelRecord, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let registry_number = required(&self.registry_number, FormField::RegistryNumber, &mut errors);
    let full_name = required(&self.full_name, FormField::FullName, &mut errors);
    if self.title.is_none() {
      errors.push(ValidationError::Required(FormField::Title));
    }
    if self.department.is_none() {
      errors.push(ValidationError::Required(FormField::Department));
    }
    if self.registry_number_taken(roster) {
      errors.push(ValidationError::DuplicateRegistryNumber(registry_number.to_owned()));
    }

    let hire_date = required_date(&self.hire_date, FormField::HireDate, &mut errors);
    let banking_start = required_date(
      &self.banking_seniority_start_date,
      FormField::BankingSeniorityStartDate,
      &mut errors,
    );
    let audit_start = required_date(
      &self.audit_seniority_start_date,
      FormField::AuditSeniorityStartDate,
      &mut errors,
    );
    let termination_date = if self.has_termination() {
      date(&self.termination_date, FormField::TerminationDate, &mut errors)
    } else {
      None
    };

    let banking_absence =
      days(&self.banking_absence_days, FormField::BankingAbsenceDays, &mut errors);
    let audit_absence = days(&self.audit_absence_days, FormField::AuditAbsenceDays, &mut errors);
    let bonus = days(&self.promotion_bonus_days, FormField::PromotionBonusDays, &mut errors);

    if let (Some(department), TriState::Value(division)) = (self.department, &self.division)
      && !department.divisions().contains(&division.as_str())
    {
      errors.push(ValidationError::DivisionOutOfScope { division: division.clone() });
    }
    if let Some(title) = self.title {
      if title.division_applies() && self.division.is_not_applicable() {
        errors.push(ValidationError::MarkerNotAllowed(FormField::Division));
      }
      if title.seal_applies() && self.seal_number.is_not_applicable() {
        errors.push(ValidationError::MarkerNotAllowed(FormField::SealNumber));
      }
    }

    match (
      self.title,
      self.department,
      hire_date,
      banking_start,
      audit_start,
      banking_absence,
      audit_absence,
      bonus,
    ) {
      (
        Some(title),
        Some(department),
        Some(hire_date),
        Some(banking_start),
        Some(audit_start),
        Some(banking_absence),
        Some(audit_absence),
        Some(bonus),
      ) if errors.is_empty() => Ok(PersonnelRecord {
        id: match self.mode {
          FormMode::Create => Uuid::new_v4(),
          FormMode::Edit(id) => id,
        },
        registry_number: registry_number.to_owned(),
        full_name: full_name.to_owned(),
        title,
        seal_number: self.seal_number.clone(),
        department,
        division: self.division.clone(),
        hire_date,
        banking_seniority_start_date: banking_start,
        banking_absence_days: banking_absence,
        audit_seniority_start_date: audit_start,
        audit_absence_days: audit_absence,
        promotion_bonus_days: bonus,
        banking_seniority_years: rules::round2(self.banking_seniority_years),
        audit_seniority_years: rules::round2(self.audit_seniority_years),
        next_promotion_date: self.next_promotion_date,
        promotion_eligible: self.promotion_eligible,
        termination_date,
        status: rules::status_for_termination(termination_date.is_some()),
      }),
      _ => Err(errors),
    }
  }

  // ── Derivations ───────────────────────────────────────────────────────────

  fn has_termination(&self) -> bool { !self.termination_date.trim().is_empty() }

  fn recompute_banking(&mut self, today: NaiveDate) {
    self.banking_seniority_years = rules::seniority_from_input(
      "banking",
      &self.banking_seniority_start_date,
      &self.banking_absence_days,
      today,
    );
  }

  fn recompute_audit(&mut self, today: NaiveDate) {
    self.audit_seniority_years = rules::seniority_from_input(
      "audit",
      &self.audit_seniority_start_date,
      &self.audit_absence_days,
      today,
    );
  }

  fn recompute_promotion(&mut self) {
    self.next_promotion_date = rules::promotion_from_input(
      self.title,
      &self.audit_seniority_start_date,
      &self.promotion_bonus_days,
    );
  }

  fn enforce_title_rules(&mut self, title_changed: bool) {
    let seal = std::mem::take(&mut self.seal_number);
    self.seal_number = rules::seal_number(self.title, seal, title_changed);

    let eligible = std::mem::take(&mut self.promotion_eligible);
    self.promotion_eligible = rules::promotion_eligibility(self.title, eligible, title_changed);

    if let Some(department) = rules::forced_department(self.title) {
      self.department = Some(department);
    }

    let division = std::mem::take(&mut self.division);
    self.division = rules::division(self.title, division, title_changed);
  }
}

impl Default for RecordForm {
  fn default() -> Self { Self::new() }
}

// ─── Validation helpers ──────────────────────────────────────────────────────

fn required<'a>(value: &'a str, field: FormField, errors: &mut Vec<ValidationError>) -> &'a str {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    errors.push(ValidationError::Required(field));
  }
  trimmed
}

fn required_date(
  value: &str,
  field: FormField,
  errors: &mut Vec<ValidationError>,
) -> Option<NaiveDate> {
  if value.trim().is_empty() {
    errors.push(ValidationError::Required(field));
    return None;
  }
  date(value, field, errors)
}

fn date(value: &str, field: FormField, errors: &mut Vec<ValidationError>) -> Option<NaiveDate> {
  rules::parse_date(value)
    .map_err(|_| {
      errors.push(ValidationError::InvalidDate { field, input: value.trim().to_owned() })
    })
    .ok()
}

fn days(value: &str, field: FormField, errors: &mut Vec<ValidationError>) -> Option<i64> {
  rules::parse_days(value)
    .map_err(|_| {
      errors.push(ValidationError::InvalidDays { field, input: value.trim().to_owned() })
    })
    .ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::tests::sample;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn today() -> NaiveDate { date("2026-10-15") }

  /// A complete, valid inspector form.
  fn filled() -> RecordForm {
    let t = today();
    [
      FieldChange::RegistryNumber("1001".into()),
      FieldChange::FullName("Ayşe Yılmaz".into()),
      FieldChange::Title(Some(Title::Inspector)),
      FieldChange::SealNumber("17".into()),
      FieldChange::Department(Some(Department::BankingAudits)),
      FieldChange::Division("Merkezi Denetimler".into()),
      FieldChange::HireDate("2018-01-02".into()),
      FieldChange::BankingSeniorityStartDate("2018-01-02".into()),
      FieldChange::AuditSeniorityStartDate("2020-03-10".into()),
      FieldChange::PromotionBonusDays("10".into()),
    ]
    .into_iter()
    .fold(RecordForm::new(), |form, change| form.apply(change, t))
  }

  #[test]
  fn derived_fields_update_on_each_edit() {
    let form = filled();
    assert_eq!(form.next_promotion_date, TriState::Value(date("2025-03-20")));
    assert!(form.audit_seniority_years > 6.0);
    assert!(form.banking_seniority_years > 8.0);

    let form = form.apply(FieldChange::AuditAbsenceDays("365".into()), today());
    assert!(form.audit_seniority_years < 6.0);
  }

  #[test]
  fn assistant_inspector_has_no_seal() {
    let form = filled().apply(FieldChange::Title(Some(Title::AssistantInspector)), today());
    assert_eq!(form.seal_number, TriState::NotApplicable);

    // A direct edit cannot override the sentinel.
    let form = form.apply(FieldChange::SealNumber("99".into()), today());
    assert_eq!(form.seal_number, TriState::NotApplicable);

    // Leaving the rank clears the sentinel for re-entry.
    let form = form.apply(FieldChange::Title(Some(Title::Inspector)), today());
    assert_eq!(form.seal_number, TriState::Empty);
  }

  #[test]
  fn senior_titles_pin_eligibility_and_promotion() {
    for title in [Title::ChiefInspector, Title::ViceChair, Title::Chair] {
      let form = filled()
        .apply(FieldChange::Title(Some(title)), today())
        .apply(FieldChange::PromotionEligible(Eligibility::No), today());
      assert_eq!(form.promotion_eligible, TriState::NotApplicable, "{title}");
      assert_eq!(form.next_promotion_date, TriState::NotApplicable, "{title}");
    }
  }

  #[test]
  fn leaving_senior_title_restores_eligibility() {
    let form = filled()
      .apply(FieldChange::Title(Some(Title::ChiefInspector)), today())
      .apply(FieldChange::Title(Some(Title::SeniorInspector)), today());
    assert_eq!(form.promotion_eligible, TriState::Value(Eligibility::Yes));
    assert_eq!(form.next_promotion_date, TriState::Value(date("2027-03-20")));
  }

  #[test]
  fn chair_forces_department_and_division() {
    let form = filled().apply(FieldChange::Title(Some(Title::Chair)), today());
    assert_eq!(form.department, Some(Department::InspectionBoardChairmanship));
    assert_eq!(form.division, TriState::NotApplicable);

    let form = form.apply(FieldChange::Department(Some(Department::BankingAudits)), today());
    assert_eq!(form.department, Some(Department::InspectionBoardChairmanship));
    assert_eq!(form.division, TriState::NotApplicable);
    assert!(form.validate(&Roster::default()).is_ok());
  }

  #[test]
  fn department_change_resets_division() {
    let form = filled().apply(
      FieldChange::Department(Some(Department::InformationSystemsAudits)),
      today(),
    );
    assert_eq!(form.division, TriState::Empty);
    assert_eq!(form.division_options().len(), 3);
  }

  #[test]
  fn termination_date_drives_status() {
    let form = filled().apply(FieldChange::TerminationDate("2026-01-31".into()), today());
    assert_eq!(form.status, Status::Inactive);
    let form = form.apply(FieldChange::TerminationDate(String::new()), today());
    assert_eq!(form.status, Status::Active);
  }

  #[test]
  fn status_toggle_round_trip() {
    let form = filled().apply(FieldChange::Status(Status::Inactive), today());
    assert_eq!(form.termination_date, "2026-10-15");

    let form = form.apply(FieldChange::Status(Status::Active), today());
    assert_eq!(form.status, Status::Active);
    assert!(form.termination_date.is_empty());

    let record = form.validate(&Roster::default()).unwrap();
    assert_eq!(record.termination_date, None);
  }

  #[test]
  fn inactive_keeps_existing_termination_date() {
    let form = filled()
      .apply(FieldChange::TerminationDate("2025-05-05".into()), today())
      .apply(FieldChange::Status(Status::Inactive), today());
    assert_eq!(form.termination_date, "2025-05-05");
  }

  #[test]
  fn validate_requires_fields() {
    let errors = RecordForm::new().validate(&Roster::default()).unwrap_err();
    let fields: Vec<FormField> = errors.iter().map(ValidationError::field).collect();
    for field in [
      FormField::RegistryNumber,
      FormField::FullName,
      FormField::Title,
      FormField::Department,
      FormField::HireDate,
      FormField::BankingSeniorityStartDate,
      FormField::AuditSeniorityStartDate,
    ] {
      assert!(fields.contains(&field), "missing error for {field:?}");
    }
  }

  #[test]
  fn duplicate_registry_number_rejected_on_create_only() {
    let mut roster = Roster::default();
    let existing = sample("1001", Title::Inspector);
    roster.add(existing.clone()).unwrap();

    let form = filled();
    assert!(form.registry_number_taken(&roster));
    let errors = form.validate(&roster).unwrap_err();
    assert_eq!(
      errors,
      vec![ValidationError::DuplicateRegistryNumber("1001".into())]
    );

    let edit = RecordForm::edit(&existing, today());
    let record = edit.validate(&roster).unwrap();
    assert_eq!(record.id, existing.id);
    assert_eq!(record.registry_number, "1001");
  }

  #[test]
  fn invalid_inputs_are_reported_per_field() {
    let form = filled()
      .apply(FieldChange::HireDate("31/12/2020".into()), today())
      .apply(FieldChange::BankingAbsenceDays("ten".into()), today());
    assert_eq!(form.banking_seniority_years, 0.0);

    let errors = form.validate(&Roster::default()).unwrap_err();
    assert!(errors.iter().any(|e| e.field() == FormField::HireDate));
    assert!(errors.iter().any(|e| e.field() == FormField::BankingAbsenceDays));
  }

  #[test]
  fn editing_a_field_clears_its_error() {
    let mut form = filled();
    form.errors = vec![ValidationError::Required(FormField::FullName)];
    let form = form.apply(FieldChange::FullName("Ali Veli".into()), today());
    assert!(form.error_for(FormField::FullName).is_none());
  }

  #[test]
  fn division_outside_department_is_rejected() {
    let form = filled().apply(FieldChange::Division("Denetim Analitiği".into()), today());
    let errors = form.validate(&Roster::default()).unwrap_err();
    assert_eq!(errors[0].field(), FormField::Division);
  }

  #[test]
  fn dash_rejected_where_title_does_not_force_it() {
    let form = filled()
      .apply(FieldChange::Division("-".into()), today())
      .apply(FieldChange::SealNumber("-".into()), today());
    assert_eq!(form.division, TriState::NotApplicable);

    let errors = form.validate(&Roster::default()).unwrap_err();
    assert_eq!(
      errors,
      vec![
        ValidationError::MarkerNotAllowed(FormField::Division),
        ValidationError::MarkerNotAllowed(FormField::SealNumber),
      ]
    );

    // Titles that force the marker still validate with it.
    let chair = filled().apply(FieldChange::Title(Some(Title::Chair)), today());
    assert!(chair.validate(&Roster::default()).is_ok());
    let assistant = filled().apply(FieldChange::Title(Some(Title::AssistantInspector)), today());
    assert!(assistant.validate(&Roster::default()).is_ok());
  }

  #[test]
  fn opening_an_edit_recomputes_against_today() {
    let mut record = sample("2002", Title::Inspector);
    record.audit_seniority_years = 0.0;
    record.next_promotion_date = TriState::Empty;

    let form = RecordForm::edit(&record, today());
    assert_eq!(
      form.audit_seniority_years,
      rules::seniority_years(record.audit_seniority_start_date, 0, today())
    );
    assert_eq!(form.next_promotion_date, TriState::Value(date("2021-02-01")));
  }
}
