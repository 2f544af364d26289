//! Quote repair for the doubly-escaped CSV exports.
//!
//! A known upstream artifact wraps every line in an extra pair of quotes and
//! doubles every internal quote. Repair runs before structural parsing;
//! whatever is still malformed afterwards is a hard parse error, never
//! silently recovered.

/// Repair one export: per line, trim, and if the line starts and ends with a
/// quote, strip the outer pair and collapse `""` to `"`. Clean lines pass
/// through (trimmed) unchanged, so the repair is idempotent.
pub fn repair_quoted_export(input: &str) -> String {
  input
    .lines()
    .map(repair_line)
    .collect::<Vec<_>>()
    .join("\n")
}

fn repair_line(line: &str) -> String {
  let line = line.trim();
  if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
    line[1..line.len() - 1].replace("\"\"", "\"")
  } else {
    line.to_string()
  }
}
