//! `.xlsx` rendering with `rust_xlsxwriter`.

use roster_core::export::{Cell, ExportTable};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::Result;

pub const SHEET_NAME: &str = "Personel Listesi";

/// One worksheet: a bold, wrapped header row, then one row per record.
/// Integers and seniority years are written as numbers.
pub fn render_spreadsheet(table: &ExportTable) -> Result<Vec<u8>> {
  let mut workbook = Workbook::new();
  let header = Format::new()
    .set_bold()
    .set_text_wrap()
    .set_align(FormatAlign::Center)
    .set_align(FormatAlign::VerticalCenter);
  let decimal = Format::new().set_num_format("0.00");

  let sheet = workbook.add_worksheet();
  sheet.set_name(SHEET_NAME)?;
  sheet.set_freeze_panes(1, 0)?;

  for (col, title) in table.headers().enumerate() {
    let col = col as u16;
    sheet.write_string_with_format(0, col, title, &header)?;
    sheet.set_column_width(col, column_width(table, col as usize, title))?;
  }

  for (row, cells) in table.rows.iter().enumerate() {
    let row = row as u32 + 1;
    for (col, cell) in cells.iter().enumerate() {
      let col = col as u16;
      match cell {
        Cell::Text(text) => sheet.write_string(row, col, text)?,
        Cell::Integer(n) => sheet.write_number(row, col, *n as f64)?,
        Cell::Decimal(n) => {
          sheet.write_number_with_format(row, col, roster_core::rules::round2(*n), &decimal)?
        }
      };
    }
  }

  Ok(workbook.save_to_buffer()?)
}

/// Wide enough for the longest header line or cell, within sane bounds.
fn column_width(table: &ExportTable, col: usize, title: &str) -> f64 {
  let header = title.lines().map(|l| l.chars().count()).max().unwrap_or(0);
  let cells = table
    .rows
    .iter()
    .filter_map(|r| r.get(col))
    .map(|c| c.to_string().chars().count())
    .max()
    .unwrap_or(0);
  (header.max(cells) as f64 + 2.0).clamp(8.0, 48.0)
}

#[cfg(test)]
mod tests {
  use roster_core::column::Column;

  use super::*;

  fn table() -> ExportTable {
    ExportTable {
      columns: vec![Column::RegistryNumber, Column::AuditAbsenceDays, Column::AuditSeniorityYears],
      rows:    vec![
        vec![Cell::Text("1001".into()), Cell::Integer(12), Cell::Decimal(4.4271)],
        vec![Cell::Text("1002".into()), Cell::Integer(-3), Cell::Decimal(0.0)],
      ],
    }
  }

  #[test]
  fn renders_a_zip_container() {
    let bytes = render_spreadsheet(&table()).unwrap();
    // xlsx files are zip archives.
    assert_eq!(&bytes[..2], b"PK");
  }

  #[test]
  fn renders_an_empty_table() {
    let empty = ExportTable { columns: vec![Column::FullName], rows: Vec::new() };
    assert!(!render_spreadsheet(&empty).unwrap().is_empty());
  }

  #[test]
  fn widths_fit_headers_and_cells() {
    let t = table();
    assert_eq!(column_width(&t, 0, "Sicil No"), 10.0);
    // "Denetim Kıdemi" is the longest header line.
    assert_eq!(column_width(&t, 2, Column::AuditSeniorityYears.header()), 16.0);
  }
}
