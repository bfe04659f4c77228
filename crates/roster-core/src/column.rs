//! The roster table's columns and how each one reads a record.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use strum::{EnumIter, IntoEnumIterator};

use crate::{
  record::{NOT_APPLICABLE, PersonnelRecord, TriState},
  rules::{self, DISPLAY_DATE},
};

/// One column of the roster table. Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Column {
  RegistryNumber,
  FullName,
  Title,
  SealNumber,
  Department,
  Division,
  HireDate,
  BankingSeniorityStartDate,
  BankingAbsenceDays,
  AuditSeniorityStartDate,
  AuditAbsenceDays,
  PromotionBonusDays,
  BankingSeniorityYears,
  AuditSeniorityYears,
  NextPromotionDate,
  PromotionEligible,
  TerminationDate,
  Status,
}

/// The shape of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
  Text,
  Date,
  Days,
  Years,
}

/// A column value reduced to something orderable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
  /// Empty slots and not-applicable sentinels.
  Missing,
  Rank(u8),
  Text(&'a str),
  Int(i64),
  Number(f64),
  Date(NaiveDate),
}

impl SortValue<'_> {
  /// Order two present values of the same column. Values of different
  /// shapes never meet in practice and compare equal.
  pub fn compare(&self, other: &Self) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (self, other) {
      (Self::Rank(a), Self::Rank(b)) => a.cmp(b),
      (Self::Text(a), Self::Text(b)) => crate::collate::compare(a, b),
      (Self::Int(a), Self::Int(b)) => a.cmp(b),
      (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
      (Self::Date(a), Self::Date(b)) => a.cmp(b),
      _ => Ordering::Equal,
    }
  }
}

impl Column {
  /// Every column, in display order.
  pub fn all() -> impl Iterator<Item = Column> { Self::iter() }

  /// Stable identifier used in configuration and on the command line.
  pub fn key(self) -> &'static str {
    match self {
      Self::RegistryNumber => "registryNumber",
      Self::FullName => "fullName",
      Self::Title => "title",
      Self::SealNumber => "sealNumber",
      Self::Department => "department",
      Self::Division => "division",
      Self::HireDate => "hireDate",
      Self::BankingSeniorityStartDate => "bankingSeniorityStartDate",
      Self::BankingAbsenceDays => "bankingAbsenceDays",
      Self::AuditSeniorityStartDate => "auditSeniorityStartDate",
      Self::AuditAbsenceDays => "auditAbsenceDays",
      Self::PromotionBonusDays => "promotionBonusDays",
      Self::BankingSeniorityYears => "bankingSeniorityYears",
      Self::AuditSeniorityYears => "auditSeniorityYears",
      Self::NextPromotionDate => "nextPromotionDate",
      Self::PromotionEligible => "promotionEligible",
      Self::TerminationDate => "terminationDate",
      Self::Status => "status",
    }
  }

  /// Key used by roster files from the earlier desktop application.
  fn legacy_key(self) -> &'static str {
    match self {
      Self::RegistryNumber => "sicilNo",
      Self::FullName => "adSoyad",
      Self::Title => "unvan",
      Self::SealNumber => "muhurNo",
      Self::Department => "birim",
      Self::Division => "servis",
      Self::HireDate => "iseGirisTarihi",
      Self::BankingSeniorityStartDate => "bankacilikKidemiBaslangicTarihi",
      Self::BankingAbsenceDays => "ayriKalinanSureBankacilik",
      Self::AuditSeniorityStartDate => "denetimKidemiBaslangicTarihi",
      Self::AuditAbsenceDays => "ayriKalinanSureDenetim",
      Self::PromotionBonusDays => "terfiyeEklenecekSure",
      Self::BankingSeniorityYears => "bankacilikKidemi",
      Self::AuditSeniorityYears => "denetimKidemi",
      Self::NextPromotionDate => "sonrakiTerfiTarihi",
      Self::PromotionEligible => "terfiyeUygun",
      Self::TerminationDate => "istenCikisTarihi",
      Self::Status => "durum",
    }
  }

  /// Export header. Long headers break onto a second line.
  pub fn header(self) -> &'static str {
    match self {
      Self::RegistryNumber => "Sicil No",
      Self::FullName => "Ad Soyad",
      Self::Title => "Unvan",
      Self::SealNumber => "Mühür No",
      Self::Department => "Birim",
      Self::Division => "Servis",
      Self::HireDate => "İşe Giriş\nTarihi",
      Self::BankingSeniorityStartDate => "Bankacılık Kıdemi\nBaşlangıç Tarihi",
      Self::BankingAbsenceDays => "Ayrı Kalınan Süre\n(Bankacılık, Gün)",
      Self::AuditSeniorityStartDate => "Denetim Kıdemi\nBaşlangıç Tarihi",
      Self::AuditAbsenceDays => "Ayrı Kalınan Süre\n(Denetim, Gün)",
      Self::PromotionBonusDays => "Terfiye Eklenecek\nSüre (Gün)",
      Self::BankingSeniorityYears => "Bankacılık Kıdemi\n(Yıl)",
      Self::AuditSeniorityYears => "Denetim Kıdemi\n(Yıl)",
      Self::NextPromotionDate => "Sonraki Terfi\nTarihi",
      Self::PromotionEligible => "Terfiye\nUygun",
      Self::TerminationDate => "İşten Çıkış\nTarihi",
      Self::Status => "Durum",
    }
  }

  /// Single-line header for the terminal table.
  pub fn label(self) -> String { self.header().replace('\n', " ") }

  pub fn kind(self) -> ColumnKind {
    match self {
      Self::HireDate
      | Self::BankingSeniorityStartDate
      | Self::AuditSeniorityStartDate
      | Self::NextPromotionDate
      | Self::TerminationDate => ColumnKind::Date,
      Self::BankingAbsenceDays | Self::AuditAbsenceDays | Self::PromotionBonusDays => {
        ColumnKind::Days
      }
      Self::BankingSeniorityYears | Self::AuditSeniorityYears => ColumnKind::Years,
      _ => ColumnKind::Text,
    }
  }

  /// Whether the column is centred in rendered tables.
  pub fn centered(self) -> bool {
    !matches!(
      self,
      Self::FullName | Self::Title | Self::Department | Self::Division | Self::Status
    )
  }

  /// The value as stored: ISO dates, plain numbers, Turkish labels.
  pub fn raw(self, record: &PersonnelRecord) -> String {
    match self {
      Self::HireDate => rules::format_iso(record.hire_date),
      Self::BankingSeniorityStartDate => rules::format_iso(record.banking_seniority_start_date),
      Self::AuditSeniorityStartDate => rules::format_iso(record.audit_seniority_start_date),
      Self::NextPromotionDate => match record.next_promotion_date {
        TriState::Value(date) => rules::format_iso(date),
        other => other.to_string(),
      },
      Self::TerminationDate => record
        .termination_date
        .map(rules::format_iso)
        .unwrap_or_default(),
      Self::BankingSeniorityYears => record.banking_seniority_years.to_string(),
      Self::AuditSeniorityYears => record.audit_seniority_years.to_string(),
      _ => self.display(record),
    }
  }

  /// The value as shown in the table and in exports: `dd.mm.yyyy` dates
  /// (`-` when absent), two-decimal years.
  pub fn display(self, record: &PersonnelRecord) -> String {
    match self {
      Self::RegistryNumber => record.registry_number.clone(),
      Self::FullName => record.full_name.clone(),
      Self::Title => record.title.label().to_owned(),
      Self::SealNumber => record.seal_number.to_string(),
      Self::Department => record.department.label().to_owned(),
      Self::Division => record.division.to_string(),
      Self::HireDate => display_date(Some(record.hire_date)),
      Self::BankingSeniorityStartDate => display_date(Some(record.banking_seniority_start_date)),
      Self::BankingAbsenceDays => record.banking_absence_days.to_string(),
      Self::AuditSeniorityStartDate => display_date(Some(record.audit_seniority_start_date)),
      Self::AuditAbsenceDays => record.audit_absence_days.to_string(),
      Self::PromotionBonusDays => record.promotion_bonus_days.to_string(),
      Self::BankingSeniorityYears => format!("{:.2}", record.banking_seniority_years),
      Self::AuditSeniorityYears => format!("{:.2}", record.audit_seniority_years),
      Self::NextPromotionDate => display_date(record.next_promotion_date.value().copied()),
      Self::PromotionEligible => record.promotion_eligible.to_string(),
      Self::TerminationDate => display_date(record.termination_date),
      Self::Status => record.status.label().to_owned(),
    }
  }

  pub fn sort_value(self, record: &PersonnelRecord) -> SortValue<'_> {
    fn text<'a>(slot: &'a TriState<String>) -> SortValue<'a> {
      slot.value().map_or(SortValue::Missing, |s| SortValue::Text(s.as_str()))
    }

    match self {
      Self::RegistryNumber => SortValue::Text(&record.registry_number),
      Self::FullName => SortValue::Text(&record.full_name),
      Self::Title => SortValue::Rank(record.title.rank()),
      Self::SealNumber => text(&record.seal_number),
      Self::Department => SortValue::Text(record.department.label()),
      Self::Division => text(&record.division),
      Self::HireDate => SortValue::Date(record.hire_date),
      Self::BankingSeniorityStartDate => SortValue::Date(record.banking_seniority_start_date),
      Self::BankingAbsenceDays => SortValue::Int(record.banking_absence_days),
      Self::AuditSeniorityStartDate => SortValue::Date(record.audit_seniority_start_date),
      Self::AuditAbsenceDays => SortValue::Int(record.audit_absence_days),
      Self::PromotionBonusDays => SortValue::Int(record.promotion_bonus_days),
      Self::BankingSeniorityYears => SortValue::Number(record.banking_seniority_years),
      Self::AuditSeniorityYears => SortValue::Number(record.audit_seniority_years),
      Self::NextPromotionDate => record
        .next_promotion_date
        .value()
        .map_or(SortValue::Missing, |d| SortValue::Date(*d)),
      Self::PromotionEligible => record
        .promotion_eligible
        .value()
        .map_or(SortValue::Missing, |e| SortValue::Text(e.label())),
      Self::TerminationDate => record
        .termination_date
        .map_or(SortValue::Missing, SortValue::Date),
      Self::Status => SortValue::Text(record.status.label()),
    }
  }
}

fn display_date(date: Option<NaiveDate>) -> String {
  date.map_or_else(
    || NOT_APPLICABLE.to_owned(),
    |d| d.format(DISPLAY_DATE).to_string(),
  )
}

impl fmt::Display for Column {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.key()) }
}

impl FromStr for Column {
  type Err = String;

  /// Accepts the column key, the legacy Turkish key, or the snake_case key,
  /// ignoring case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().replace(['_', '-'], "").to_lowercase();
    Self::iter()
      .find(|c| c.key().to_lowercase() == wanted || c.legacy_key().to_lowercase() == wanted)
      .ok_or_else(|| format!("unknown column: {s:?}"))
  }
}
