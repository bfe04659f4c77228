//! Error types for `roster-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::form::FormField;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record not found: {0}")]
  RecordNotFound(Uuid),

  #[error("registry number {0:?} is already in use")]
  DuplicateRegistryNumber(String),

  #[error("invalid date: {0:?}")]
  InvalidDate(String),

  #[error("invalid day count: {0:?}")]
  InvalidDays(String),

  #[error("date arithmetic out of range")]
  DateOutOfRange,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A reason the record form refuses to commit. Each variant names the field
/// it should be shown next to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} zorunludur")]
  Required(FormField),

  #[error("Personel kaydı bulunmaktadır: {0}")]
  DuplicateRegistryNumber(String),

  #[error("{field}: geçersiz tarih {input:?}")]
  InvalidDate { field: FormField, input: String },

  #[error("{field}: geçersiz gün sayısı {input:?}")]
  InvalidDays { field: FormField, input: String },

  #[error("{division:?} bu birime ait bir servis değil")]
  DivisionOutOfScope { division: String },

  /// `-` entered in a slot the current title does not mark as not applicable.
  #[error("{0}: \"-\" bu unvan için kullanılamaz")]
  MarkerNotAllowed(FormField),
}

impl ValidationError {
  /// The form field this error belongs to.
  pub fn field(&self) -> FormField {
    match self {
      Self::Required(field) | Self::MarkerNotAllowed(field) => *field,
      Self::DuplicateRegistryNumber(_) => FormField::RegistryNumber,
      Self::InvalidDate { field, .. } | Self::InvalidDays { field, .. } => *field,
      Self::DivisionOutOfScope { .. } => FormField::Division,
    }
  }
}
