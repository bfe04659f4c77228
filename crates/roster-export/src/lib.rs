//! File renderers for roster exports.
//!
//! Takes an [`ExportTable`] projected by `roster-core` and produces the
//! bytes of a downloadable file: an `.xlsx` workbook or a standalone HTML
//! page. Also produces the empty-roster bootstrap file.

mod document;
mod spreadsheet;

pub mod error;

use chrono::NaiveDateTime;
pub use error::{Error, Result};
use roster_core::{
  export::{ExportFormat, ExportTable},
  roster::Roster,
};

pub use document::render_document;
pub use spreadsheet::render_spreadsheet;

pub const SPREADSHEET_FILENAME: &str = "personnel-list.xlsx";
pub const DOCUMENT_FILENAME: &str = "personnel-list.html";
pub const TEMPLATE_FILENAME: &str = "personnel-database.json";

/// A rendered file and the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
  pub filename:   &'static str,
  pub media_type: &'static str,
  pub bytes:      Vec<u8>,
}

/// Render `table` in `format`. `generated_at` is stamped into the document
/// footer.
pub fn export(
  table: &ExportTable,
  format: ExportFormat,
  generated_at: NaiveDateTime,
) -> Result<ExportArtifact> {
  let artifact = match format {
    ExportFormat::Spreadsheet => ExportArtifact {
      filename:   SPREADSHEET_FILENAME,
      media_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
      bytes:      render_spreadsheet(table)?,
    },
    ExportFormat::Document => ExportArtifact {
      filename:   DOCUMENT_FILENAME,
      media_type: "text/html; charset=utf-8",
      bytes:      render_document(table, generated_at)?,
    },
  };
  tracing::info!(
    filename = artifact.filename,
    rows = table.rows.len(),
    columns = table.columns.len(),
    bytes = artifact.bytes.len(),
    "export rendered"
  );
  Ok(artifact)
}

/// The empty roster, serialised so it can later be imported as a store.
pub fn template() -> Result<ExportArtifact> {
  Ok(ExportArtifact {
    filename:   TEMPLATE_FILENAME,
    media_type: "application/json",
    bytes:      Roster::default().to_json_pretty()?.into_bytes(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_is_an_empty_collection() {
    let artifact = template().unwrap();
    assert_eq!(artifact.filename, "personnel-database.json");
    assert_eq!(artifact.bytes, b"[]");
    assert!(Roster::from_json(std::str::from_utf8(&artifact.bytes).unwrap()).unwrap().is_empty());
  }
}
