//! ETL reshaper for the social-radar core.
//!
//! Converts the three raw sources into the normalized row types of
//! [`radar_core::tables`]. Pure synchronous; no HTTP or database
//! dependencies.
//!
//! Pipeline:
//!   raw CSV text
//!     └─ repair_quoted_export() → clean delimited text
//!          └─ parse_table()     → RawTable
//!               └─ unpivot() / load_rules() → typed rows
//!   raw JSON text
//!     └─ parse_geo()            → Vec<GeoPoint>

pub mod error;
mod geo;
mod repair;
mod rules;
mod survey;
mod table;

pub use error::{Error, Result};
pub use geo::parse_geo;
pub use repair::repair_quoted_export;
pub use table::{RawTable, parse_table};

use radar_core::tables::{SurveyFact, TimeRule};

/// Repair, parse, and unpivot a raw survey export in one step.
pub fn survey_from_source(raw: &str) -> Result<Vec<SurveyFact>> {
  let table = parse_table(&repair_quoted_export(raw))?;
  survey::unpivot(&table)
}

/// Repair, parse, and type a raw rule export in one step.
pub fn rules_from_source(raw: &str) -> Result<Vec<TimeRule>> {
  let table = parse_table(&repair_quoted_export(raw))?;
  rules::load_rules(&table)
}
