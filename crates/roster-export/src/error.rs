//! Error type for `roster-export`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("spreadsheet error: {0}")]
  Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

  #[error("html generation error: {0}")]
  Xml(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
