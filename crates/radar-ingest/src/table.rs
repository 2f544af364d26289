//! Minimal quote-aware comma-separated table parser.
//!
//! Operates on already-repaired text (see [`crate::repair`]). One record per
//! line; fields may be double-quoted, with `""` as a literal quote inside a
//! quoted field. Every data row must match the header's column count —
//! anything else is a hard error carrying the 1-based line number.

use crate::error::{Error, Result};

// ─── RawTable ────────────────────────────────────────────────────────────────

/// A parsed comma-separated table: a header row plus uniform-width data rows.
#[derive(Debug, Clone)]
pub struct RawTable {
  pub headers: Vec<String>,
  pub rows:    Vec<Vec<String>>,
}

impl RawTable {
  /// Index of a header column by exact name.
  pub fn column(&self, name: &str) -> Option<usize> {
    self.headers.iter().position(|h| h == name)
  }

  /// Like [`RawTable::column`] but failing with
  /// [`Error::MissingColumn`].
  pub fn require_column(&self, name: &str) -> Result<usize> {
    self
      .column(name)
      .ok_or_else(|| Error::MissingColumn(name.to_string()))
  }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse repaired text into a [`RawTable`]. Blank lines are skipped.
pub fn parse_table(input: &str) -> Result<RawTable> {
  let mut lines = input
    .lines()
    .enumerate()
    .filter(|(_, l)| !l.trim().is_empty());

  let (header_idx, header_line) = lines.next().ok_or(Error::EmptyTable)?;
  let headers = parse_record(header_line, header_idx + 1)?;

  let mut rows = Vec::new();
  for (idx, line) in lines {
    let line_no = idx + 1;
    let fields = parse_record(line, line_no)?;
    if fields.len() != headers.len() {
      return Err(Error::RowWidth {
        line:     line_no,
        expected: headers.len(),
        found:    fields.len(),
      });
    }
    rows.push(fields);
  }

  Ok(RawTable { headers, rows })
}

/// Parse one line into fields, honouring double-quoted fields and `""`
/// escapes inside them.
fn parse_record(line: &str, line_no: usize) -> Result<Vec<String>> {
  let mut fields = Vec::new();
  let mut field = String::new();
  let mut chars = line.chars().peekable();
  let mut in_quotes = false;

  while let Some(c) = chars.next() {
    match c {
      '"' if in_quotes => {
        if chars.peek() == Some(&'"') {
          chars.next();
          field.push('"');
        } else {
          in_quotes = false;
        }
      }
      '"' if field.is_empty() => in_quotes = true,
      ',' if !in_quotes => {
        fields.push(std::mem::take(&mut field));
      }
      _ => field.push(c),
    }
  }

  if in_quotes {
    return Err(Error::UnclosedQuote { line: line_no });
  }

  fields.push(field);
  Ok(fields)
}
