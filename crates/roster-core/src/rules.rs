//! The record rule engine: derivations that turn a record's inputs into its
//! computed fields.
//!
//! Every function here is a pure function of its arguments and an explicit
//! `today`. The `*_from_input` helpers take raw form text and never fail:
//! parse or arithmetic errors are logged and degrade to `0` for seniority
//! and [`TriState::Empty`] for dates.

use chrono::{Months, NaiveDate, TimeDelta};

use crate::{
  Error, Result,
  record::{Department, Eligibility, Status, Title, TriState},
};

/// Average calendar year length used for seniority.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Canonical on-disk date format.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Display format used in the table and in exports.
pub const DISPLAY_DATE: &str = "%d.%m.%Y";

// ─── Input parsing ───────────────────────────────────────────────────────────

/// Parse a form date. ISO is canonical; `dd.mm.yyyy` is accepted too.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
  let trimmed = input.trim();
  NaiveDate::parse_from_str(trimmed, ISO_DATE)
    .or_else(|_| NaiveDate::parse_from_str(trimmed, DISPLAY_DATE))
    .map_err(|_| Error::InvalidDate(trimmed.to_owned()))
}

/// Parse a day-count input. Blank input counts as zero.
pub fn parse_days(input: &str) -> Result<i64> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Ok(0);
  }
  trimmed
    .parse()
    .map_err(|_| Error::InvalidDays(trimmed.to_owned()))
}

pub fn format_iso(date: NaiveDate) -> String { date.format(ISO_DATE).to_string() }

pub fn round2(value: f64) -> f64 { (value * 100.0).round() / 100.0 }

// ─── Seniority ───────────────────────────────────────────────────────────────

/// Years of service between `start` and `today`, less `absence_days`,
/// rounded to two decimals.
pub fn seniority_years(start: NaiveDate, absence_days: i64, today: NaiveDate) -> f64 {
  let days = today
    .signed_duration_since(start)
    .num_days()
    .saturating_sub(absence_days);
  round2(days as f64 / DAYS_PER_YEAR)
}

/// Seniority from raw form input. A blank start date yields `0` silently;
/// anything unparseable yields `0` and a warning.
pub fn seniority_from_input(
  track: &str,
  start: &str,
  absence_days: &str,
  today: NaiveDate,
) -> f64 {
  if start.trim().is_empty() {
    return 0.0;
  }
  let computed = parse_date(start)
    .and_then(|start| Ok(seniority_years(start, parse_days(absence_days)?, today)));
  match computed {
    Ok(years) => years,
    Err(e) => {
      tracing::warn!(track, start, absence_days, error = %e, "seniority computation failed");
      0.0
    }
  }
}

// ─── Promotion ───────────────────────────────────────────────────────────────

/// Next promotion date for `title`: the audit start date plus the rank's
/// required years (calendar years, clamping 29 February to the 28th), plus
/// `bonus_days`. Ranks without a promotion track yield `NotApplicable`.
pub fn promotion_date(
  title: Title,
  audit_start: NaiveDate,
  bonus_days: i64,
) -> Result<TriState<NaiveDate>> {
  let Some(years) = title.required_years() else {
    return Ok(TriState::NotApplicable);
  };
  let bonus = TimeDelta::try_days(bonus_days).ok_or(Error::DateOutOfRange)?;
  let date = audit_start
    .checked_add_months(Months::new(years * 12))
    .and_then(|base| base.checked_add_signed(bonus))
    .ok_or(Error::DateOutOfRange)?;
  Ok(TriState::Value(date))
}

/// Next promotion date from raw form input.
pub fn promotion_from_input(
  title: Option<Title>,
  audit_start: &str,
  bonus_days: &str,
) -> TriState<NaiveDate> {
  let Some(title) = title else {
    return TriState::Empty;
  };
  if title.required_years().is_none() {
    return TriState::NotApplicable;
  }
  if audit_start.trim().is_empty() {
    return TriState::Empty;
  }
  let computed = parse_date(audit_start)
    .and_then(|start| promotion_date(title, start, parse_days(bonus_days)?));
  match computed {
    Ok(date) => date,
    Err(e) => {
      tracing::warn!(
        %title, audit_start, bonus_days, error = %e,
        "promotion date computation failed"
      );
      TriState::Empty
    }
  }
}

// ─── Title-driven defaults ───────────────────────────────────────────────────
//
// `title_changed` distinguishes "the user just picked a new title" (stale
// sentinels are cleared) from re-enforcement after an unrelated edit
// (sentinels are only forced, never cleared).

/// Assistant inspectors have no seal; leaving that rank clears the marker
/// so a real seal number must be entered.
pub fn seal_number(
  title: Option<Title>,
  current: TriState<String>,
  title_changed: bool,
) -> TriState<String> {
  match title {
    Some(t) if !t.seal_applies() => TriState::NotApplicable,
    _ if title_changed && current.is_not_applicable() => TriState::Empty,
    _ => current,
  }
}

/// Senior ranks are never reviewed for promotion; leaving them restores
/// the default `Yes`.
pub fn promotion_eligibility(
  title: Option<Title>,
  current: TriState<Eligibility>,
  title_changed: bool,
) -> TriState<Eligibility> {
  match title {
    Some(t) if !t.promotion_applies() => TriState::NotApplicable,
    _ if title_changed && current.is_not_applicable() => TriState::Value(Eligibility::Yes),
    _ => current,
  }
}

/// The chair and vice chairs have no division.
pub fn division(
  title: Option<Title>,
  current: TriState<String>,
  title_changed: bool,
) -> TriState<String> {
  match title {
    Some(t) if !t.division_applies() => TriState::NotApplicable,
    _ if title_changed && current.is_not_applicable() => TriState::Empty,
    _ => current,
  }
}

/// The chair always sits in the top-level department.
pub fn forced_department(title: Option<Title>) -> Option<Department> {
  (title == Some(Title::Chair)).then_some(Department::InspectionBoardChairmanship)
}

// ─── Status / termination ────────────────────────────────────────────────────

/// What to do with the termination date after the status was edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationUpdate {
  Keep,
  Set(NaiveDate),
  Clear,
}

/// Status implied by a termination date being present or absent.
pub fn status_for_termination(has_termination: bool) -> Status {
  if has_termination { Status::Inactive } else { Status::Active }
}

/// Termination date change implied by a status edit: going inactive stamps
/// today unless a date is already set; going active clears it.
pub fn termination_for_status(
  status: Status,
  has_termination: bool,
  today: NaiveDate,
) -> TerminationUpdate {
  match status {
    Status::Active => TerminationUpdate::Clear,
    Status::Inactive if has_termination => TerminationUpdate::Keep,
    Status::Inactive => TerminationUpdate::Set(today),
  }
}
