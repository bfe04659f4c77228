//! The roster: the whole ordered collection of personnel records.
//!
//! The roster is always persisted as one value. Every mutation here is
//! followed by the caller handing the complete collection back to the
//! store; there are no partial writes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  form::FormMode,
  record::{PersonnelRecord, Status},
  rules::{self, TerminationUpdate},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
  records: Vec<PersonnelRecord>,
}

impl Roster {
  pub fn new(records: Vec<PersonnelRecord>) -> Self { Self { records } }

  pub fn records(&self) -> &[PersonnelRecord] { &self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn get(&self, id: Uuid) -> Option<&PersonnelRecord> {
    self.records.iter().find(|r| r.id == id)
  }

  /// Whether any record, active or not, already uses `registry_number`.
  pub fn contains_registry_number(&self, registry_number: &str) -> bool {
    self
      .records
      .iter()
      .any(|r| r.registry_number == registry_number)
  }

  /// Append a new record. Rejects a registry number that is already taken.
  pub fn add(&mut self, record: PersonnelRecord) -> Result<()> {
    if self.contains_registry_number(&record.registry_number) {
      return Err(Error::DuplicateRegistryNumber(record.registry_number));
    }
    self.records.push(record);
    Ok(())
  }

  /// Replace the record with the same id. The registry number is not
  /// re-checked.
  pub fn replace(&mut self, record: PersonnelRecord) -> Result<()> {
    let slot = self
      .records
      .iter_mut()
      .find(|r| r.id == record.id)
      .ok_or(Error::RecordNotFound(record.id))?;
    *slot = record;
    Ok(())
  }

  /// Add or replace, depending on which form produced `record`.
  pub fn commit(&mut self, mode: FormMode, record: PersonnelRecord) -> Result<()> {
    match mode {
      FormMode::Create => self.add(record),
      FormMode::Edit(_) => self.replace(record),
    }
  }

  pub fn remove(&mut self, id: Uuid) -> Result<PersonnelRecord> {
    let index = self
      .records
      .iter()
      .position(|r| r.id == id)
      .ok_or(Error::RecordNotFound(id))?;
    Ok(self.records.remove(index))
  }

  /// Flip a record between active and inactive from the table, keeping the
  /// termination date in step. Returns the new status.
  pub fn toggle_status(&mut self, id: Uuid, today: NaiveDate) -> Result<Status> {
    let record = self
      .records
      .iter_mut()
      .find(|r| r.id == id)
      .ok_or(Error::RecordNotFound(id))?;
    let status = record.status.toggled();
    match rules::termination_for_status(status, record.termination_date.is_some(), today) {
      TerminationUpdate::Keep => {}
      TerminationUpdate::Set(date) => record.termination_date = Some(date),
      TerminationUpdate::Clear => record.termination_date = None,
    }
    record.status = status;
    Ok(status)
  }

  pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }

  pub fn to_json_pretty(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

  pub fn from_json(json: &str) -> Result<Self> { Ok(serde_json::from_str(json)?) }
}
