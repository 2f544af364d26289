//! Wide→long unpivot of the survey table.
//!
//! The raw survey is wide: one respondent row carries three columns per
//! archetype — male-directed traits (`{prefix}_fisik_cowo`), female-directed
//! traits (`{prefix}_fisik_cewe`), and a location cell (`{prefix}_lokasi`).
//! Unpivoting emits one [`SurveyFact`] per (respondent, archetype) pair that
//! carried any data.

use radar_core::{
  Archetype,
  tables::{Gender, SurveyFact},
};

use crate::{
  error::Result,
  table::RawTable,
};

/// Unpivot a parsed survey table into long-form facts.
///
/// `timestamp` and `gender` columns are required; the per-archetype columns
/// are optional (a missing column reads as empty for every row).
pub fn unpivot(table: &RawTable) -> Result<Vec<SurveyFact>> {
  let ts_idx = table.require_column("timestamp")?;
  let gender_idx = table.require_column("gender")?;

  // Resolve the three column indexes per archetype once, up front.
  let columns: Vec<(Archetype, ArchetypeColumns)> = Archetype::ALL
    .into_iter()
    .map(|a| {
      let p = a.column_prefix();
      (a, ArchetypeColumns {
        male_traits:   table.column(&format!("{p}_fisik_cowo")),
        female_traits: table.column(&format!("{p}_fisik_cewe")),
        habitats:      table.column(&format!("{p}_lokasi")),
      })
    })
    .collect();

  let mut facts = Vec::new();
  for row in &table.rows {
    let timestamp = row[ts_idx].trim().to_string();
    let gender = Gender::from_survey_text(&row[gender_idx]);

    for (archetype, cols) in &columns {
      let male = clean_cell(cols.male_traits.map_or("", |i| &row[i]));
      let female = clean_cell(cols.female_traits.map_or("", |i| &row[i]));
      let habitats = clean_cell(cols.habitats.map_or("", |i| &row[i]));

      let traits = match (male.is_empty(), female.is_empty()) {
        (false, false) => format!("{male}, {female}"),
        (false, true) => male.to_string(),
        (true, false) => female.to_string(),
        (true, true) => String::new(),
      };

      // A fact row exists only if it carries any data.
      if traits.is_empty() && habitats.is_empty() {
        continue;
      }

      facts.push(SurveyFact {
        timestamp: timestamp.clone(),
        gender,
        archetype: *archetype,
        traits,
        habitats: habitats.to_string(),
      });
    }
  }

  Ok(facts)
}

struct ArchetypeColumns {
  male_traits:   Option<usize>,
  female_traits: Option<usize>,
  habitats:      Option<usize>,
}

/// Trim a cell and erase the literal "nan" that pandas-era exports leave in
/// blank cells.
fn clean_cell(cell: &str) -> &str {
  let cell = cell.trim();
  if cell.eq_ignore_ascii_case("nan") { "" } else { cell }
}

#[cfg(test)]
mod tests {
  use radar_core::Archetype;

  use super::*;
  use crate::table::parse_table;

  const HEADER: &str = "timestamp,gender,intel_fisik_cowo,intel_fisik_cewe,\
                        intel_lokasi,sporty_fisik_cowo,sporty_fisik_cewe,sporty_lokasi";

  #[test]
  fn single_category_row_unpivots_to_one_fact() {
    let src = format!("{HEADER}\nt1,Perempuan,Kacamata,Buku,Perpustakaan,,,");
    let table = parse_table(&src).unwrap();
    let facts = unpivot(&table).unwrap();

    assert_eq!(facts.len(), 1);
    let fact = &facts[0];
    assert_eq!(fact.archetype, Archetype::Intellectual);
    assert_eq!(fact.gender, Gender::Female);
    assert_eq!(fact.traits, "Kacamata, Buku");
    assert_eq!(fact.habitats, "Perpustakaan");
  }

  #[test]
  fn gender_directed_columns_are_concatenated() {
    let src = format!("{HEADER}\nt1,Laki-laki,Kemeja,,,Jersey,Sneaker,Gym");
    let table = parse_table(&src).unwrap();
    let facts = unpivot(&table).unwrap();

    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].traits, "Kemeja");
    assert_eq!(facts[1].traits, "Jersey, Sneaker");
    assert_eq!(facts[1].habitats, "Gym");
  }

  #[test]
  fn location_only_row_is_kept() {
    let src = format!("{HEADER}\nt1,Perempuan,,,Perpustakaan,,,");
    let facts = unpivot(&parse_table(&src).unwrap()).unwrap();
    assert_eq!(facts.len(), 1);
    assert!(facts[0].traits.is_empty());
    assert_eq!(facts[0].habitats, "Perpustakaan");
  }

  #[test]
  fn all_empty_row_emits_nothing() {
    let src = format!("{HEADER}\nt1,Perempuan,,,,,,");
    let facts = unpivot(&parse_table(&src).unwrap()).unwrap();
    assert!(facts.is_empty());
  }

  #[test]
  fn literal_nan_reads_as_empty() {
    let src = format!("{HEADER}\nt1,Perempuan,nan,NaN,Perpustakaan,,,");
    let facts = unpivot(&parse_table(&src).unwrap()).unwrap();
    assert_eq!(facts.len(), 1);
    assert!(facts[0].traits.is_empty());
  }

  #[test]
  fn missing_required_column_is_an_error() {
    let table = parse_table("gender,intel_lokasi\nPerempuan,x").unwrap();
    let err = unpivot(&table).unwrap_err();
    assert!(matches!(
      err,
      crate::Error::MissingColumn(c) if c == "timestamp"
    ));
  }

  #[test]
  fn missing_archetype_columns_read_as_empty() {
    // Only the intellectual columns exist; the other six archetypes must not
    // produce rows or errors.
    let src = "timestamp,gender,intel_fisik_cowo\nt1,Perempuan,Kacamata";
    let facts = unpivot(&parse_table(src).unwrap()).unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].archetype, Archetype::Intellectual);
  }
}
