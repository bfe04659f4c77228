//! Export projection: the visible columns of the current view as a table of
//! typed cells, ready for a file-format renderer.

use std::fmt;

use crate::{column::Column, record::PersonnelRecord};

/// Target file format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
  /// `.xlsx` workbook.
  Spreadsheet,
  /// Standalone styled HTML page.
  Document,
}

impl ExportFormat {
  pub fn label(self) -> &'static str {
    match self {
      Self::Spreadsheet => "Excel (.xlsx)",
      Self::Document => "HTML (.html)",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Text(String),
  Integer(i64),
  /// Seniority years; always rendered with two decimals.
  Decimal(f64),
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Text(s) => f.write_str(s),
      Self::Integer(n) => write!(f, "{n}"),
      Self::Decimal(n) => write!(f, "{n:.2}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
  pub columns: Vec<Column>,
  pub rows:    Vec<Vec<Cell>>,
}

impl ExportTable {
  /// Header labels, possibly spanning two lines.
  pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.columns.iter().map(|c| c.header())
  }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// Project `rows`, already filtered and sorted, onto `columns`.
pub fn project(rows: &[&PersonnelRecord], columns: &[Column]) -> ExportTable {
  ExportTable {
    columns: columns.to_vec(),
    rows:    rows
      .iter()
      .map(|record| columns.iter().map(|c| cell(*c, record)).collect())
      .collect(),
  }
}

fn cell(column: Column, record: &PersonnelRecord) -> Cell {
  match column {
    Column::BankingAbsenceDays => Cell::Integer(record.banking_absence_days),
    Column::AuditAbsenceDays => Cell::Integer(record.audit_absence_days),
    Column::PromotionBonusDays => Cell::Integer(record.promotion_bonus_days),
    Column::BankingSeniorityYears => Cell::Decimal(record.banking_seniority_years),
    Column::AuditSeniorityYears => Cell::Decimal(record.audit_seniority_years),
    _ => Cell::Text(column.display(record)),
  }
}
