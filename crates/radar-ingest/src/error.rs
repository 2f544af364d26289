//! Error types for the radar-ingest reshaper.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("source has no header row")]
  EmptyTable,

  #[error("line {line}: unclosed quoted field")]
  UnclosedQuote { line: usize },

  #[error("line {line}: expected {expected} columns, found {found}")]
  RowWidth {
    line:     usize,
    expected: usize,
    found:    usize,
  },

  #[error("missing required column: {0:?}")]
  MissingColumn(String),

  #[error("line {line}: invalid hour in {column:?}: {value:?}")]
  InvalidHour {
    line:   usize,
    column: String,
    value:  String,
  },

  #[error("geo export JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
