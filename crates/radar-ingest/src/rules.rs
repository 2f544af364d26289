//! Typed load of the social-time rule table.

use radar_core::tables::TimeRule;

use crate::{
  error::{Error, Result},
  table::RawTable,
};

/// Load a parsed rule table into typed [`TimeRule`] rows.
///
/// Day names are normalized (lowercased, trimmed) here so query-time matching
/// is a plain equality. Hours must parse as numbers; label columns are kept
/// verbatim.
pub fn load_rules(table: &RawTable) -> Result<Vec<TimeRule>> {
  let day_idx = table.require_column("day_category")?;
  let start_idx = table.require_column("start_hour")?;
  let end_idx = table.require_column("end_hour")?;
  let phase_idx = table.require_column("phase_name")?;
  let status_idx = table.require_column("status_sosial")?;
  let priority_idx = table.require_column("rekomendasi_prioritas")?;

  table
    .rows
    .iter()
    .enumerate()
    .map(|(i, row)| {
      // Header is line 1; data starts at line 2.
      let line = i + 2;
      Ok(TimeRule {
        day:             row[day_idx].trim().to_lowercase(),
        start_hour:      parse_hour(&row[start_idx], "start_hour", line)?,
        end_hour:        parse_hour(&row[end_idx], "end_hour", line)?,
        phase_name:      row[phase_idx].trim().to_string(),
        social_status:   row[status_idx].trim().to_string(),
        priority_places: row[priority_idx].trim().to_string(),
      })
    })
    .collect()
}

/// An hour must be numeric and within [0, 24]; anything else would load as a
/// window no clock reading can ever fall inside.
fn parse_hour(value: &str, column: &str, line: usize) -> Result<f64> {
  let invalid = || Error::InvalidHour {
    line,
    column: column.to_string(),
    value: value.to_string(),
  };
  let hour: f64 = value.trim().parse().map_err(|_| invalid())?;
  if !(0.0..=24.0).contains(&hour) {
    return Err(invalid());
  }
  Ok(hour)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::table::parse_table;

  const HEADER: &str =
    "day_category,start_hour,end_hour,phase_name,status_sosial,rekomendasi_prioritas";

  #[test]
  fn loads_typed_rows() {
    let src = format!(
      "{HEADER}\nSenin ,7,9.5,Berangkat,Ramai,\"Cafe, Kampus\"\nsabtu,22,2,Malam,Sepi,Cafe"
    );
    let rules = load_rules(&parse_table(&src).unwrap()).unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].day, "senin");
    assert_eq!(rules[0].start_hour, 7.0);
    assert_eq!(rules[0].end_hour, 9.5);
    assert_eq!(rules[0].priority_places, "Cafe, Kampus");
    assert_eq!(rules[1].day, "sabtu");
    // Wraps midnight.
    assert!(rules[1].start_hour > rules[1].end_hour);
  }

  #[test]
  fn non_numeric_hour_is_an_error() {
    let src = format!("{HEADER}\nsenin,tujuh,9,x,y,z");
    let err = load_rules(&parse_table(&src).unwrap()).unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidHour { line: 2, ref column, .. } if column == "start_hour"
    ));
  }

  #[test]
  fn out_of_range_hour_is_an_error() {
    // 25 parses as a number but lies outside any possible clock reading;
    // loading it would create a window no hour can ever match.
    let src = format!("{HEADER}\nsenin,25,-1,x,y,z");
    let err = load_rules(&parse_table(&src).unwrap()).unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidHour { line: 2, ref column, .. } if column == "start_hour"
    ));

    let src = format!("{HEADER}\nsenin,7,24.5,x,y,z");
    let err = load_rules(&parse_table(&src).unwrap()).unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidHour { ref column, .. } if column == "end_hour"
    ));
  }

  #[test]
  fn boundary_hours_are_accepted() {
    let src = format!("{HEADER}\nsenin,0,24,x,y,z");
    let rules = load_rules(&parse_table(&src).unwrap()).unwrap();
    assert_eq!(rules[0].start_hour, 0.0);
    assert_eq!(rules[0].end_hour, 24.0);
  }

  #[test]
  fn missing_column_is_an_error() {
    let src = "day_category,start_hour\nsenin,7";
    let err = load_rules(&parse_table(src).unwrap()).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(_)));
  }
}
