//! Row types for the three normalized tables the ETL reshaper produces.
//!
//! `SurveyFact` is the long/melted form of the wide survey export: one row
//! per (respondent, archetype) pair that carried any data. `TimeRule` and
//! `GeoPoint` are loaded near-verbatim from their sources.

use serde::{Deserialize, Serialize};

use crate::{Archetype, Error, Result};

// ─── Gender ──────────────────────────────────────────────────────────────────

/// Respondent gender, decoded from the survey's free-text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Female,
  Male,
  /// Blank or unrecognized source text.
  Unspecified,
}

impl Gender {
  /// Decode the survey's free-text gender cell. Never fails; anything
  /// unrecognized is [`Gender::Unspecified`].
  pub fn from_survey_text(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "perempuan" | "cewe" | "wanita" => Self::Female,
      "laki-laki" | "laki laki" | "cowo" | "pria" => Self::Male,
      _ => Self::Unspecified,
    }
  }

  /// The discriminant string stored in the database.
  pub fn discriminant(self) -> &'static str {
    match self {
      Self::Female => "female",
      Self::Male => "male",
      Self::Unspecified => "unspecified",
    }
  }

  pub fn from_discriminant(s: &str) -> Result<Self> {
    match s {
      "female" => Ok(Self::Female),
      "male" => Ok(Self::Male),
      "unspecified" => Ok(Self::Unspecified),
      other => Err(Error::UnknownGender(other.to_string())),
    }
  }
}

// ─── SurveyFact ──────────────────────────────────────────────────────────────

/// One unpivoted survey row: what one respondent said about one archetype.
///
/// Invariant (enforced by the reshaper): at least one of `traits` /
/// `habitats` is non-empty after trimming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyFact {
  /// Submission time, kept as opaque text — ordering is irrelevant to
  /// scoring.
  pub timestamp: String,
  pub gender:    Gender,
  pub archetype: Archetype,
  /// Comma-separated free-text trait descriptors.
  pub traits:    String,
  /// Comma-separated free-text place names or place types.
  pub habitats:  String,
}

impl SurveyFact {
  /// The row's trait set, lowercased and trimmed for matching.
  pub fn trait_set(&self) -> Vec<String> {
    split_tokens(&self.traits)
      .map(|t| t.to_lowercase())
      .collect()
  }

  /// The row's habitat tokens, trimmed, empties dropped, case preserved.
  pub fn habitat_tokens(&self) -> Vec<String> {
    split_tokens(&self.habitats).map(str::to_string).collect()
  }
}

/// Split a comma-separated cell into trimmed, non-empty tokens.
pub fn split_tokens(s: &str) -> impl Iterator<Item = &str> {
  s.split(',').map(str::trim).filter(|t| !t.is_empty())
}

// ─── TimeRule ────────────────────────────────────────────────────────────────

/// One row of the social-time rule table: a day-of-week/time-window pair with
/// its labels and place-type whitelist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRule {
  /// Lowercase day name (senin…minggu); normalized at parse time.
  pub day:             String,
  /// Fractional hours in [0,24). `start_hour > end_hour` means the window
  /// wraps past midnight.
  pub start_hour:      f64,
  pub end_hour:        f64,
  pub phase_name:      String,
  pub social_status:   String,
  /// Comma-separated whitelist of prioritized place-type keywords.
  pub priority_places: String,
}

impl TimeRule {
  /// Whether `hour` falls inside this rule's window, with wraparound
  /// semantics when the window spans midnight.
  pub fn contains_hour(&self, hour: f64) -> bool {
    if self.start_hour <= self.end_hour {
      self.start_hour <= hour && hour <= self.end_hour
    } else {
      hour >= self.start_hour || hour <= self.end_hour
    }
  }

  /// The whitelist keywords, trimmed and lowercased for matching.
  pub fn whitelist(&self) -> Vec<String> {
    split_tokens(&self.priority_places)
      .map(|t| t.to_lowercase())
      .collect()
  }
}

// ─── GeoPoint ────────────────────────────────────────────────────────────────

/// One named place with resolvable coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
  pub name:     String,
  /// Decimal degrees.
  pub lat:      f64,
  pub lon:      f64,
  /// Normalized category tag (amenity/shop/leisure/tourism value, or
  /// `"unknown"`).
  pub category: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gender_decoding() {
    assert_eq!(Gender::from_survey_text("Perempuan"), Gender::Female);
    assert_eq!(Gender::from_survey_text(" laki-laki "), Gender::Male);
    assert_eq!(Gender::from_survey_text("???"), Gender::Unspecified);
    assert_eq!(Gender::from_survey_text(""), Gender::Unspecified);
  }

  #[test]
  fn gender_discriminant_round_trip() {
    for g in [Gender::Female, Gender::Male, Gender::Unspecified] {
      assert_eq!(Gender::from_discriminant(g.discriminant()).unwrap(), g);
    }
    assert!(Gender::from_discriminant("perempuan").is_err());
  }

  #[test]
  fn trait_set_is_lowercased_and_trimmed() {
    let fact = SurveyFact {
      timestamp: "t".into(),
      gender:    Gender::Female,
      archetype: Archetype::Intellectual,
      traits:    "Kacamata,  Buku , ,".into(),
      habitats:  String::new(),
    };
    assert_eq!(fact.trait_set(), vec!["kacamata", "buku"]);
  }

  #[test]
  fn window_without_wraparound() {
    let rule = TimeRule {
      day:             "senin".into(),
      start_hour:      9.0,
      end_hour:        17.0,
      phase_name:      "kerja".into(),
      social_status:   "ramai".into(),
      priority_places: String::new(),
    };
    assert!(rule.contains_hour(9.0));
    assert!(rule.contains_hour(12.5));
    assert!(rule.contains_hour(17.0));
    assert!(!rule.contains_hour(8.99));
    assert!(!rule.contains_hour(20.0));
  }

  #[test]
  fn window_wrapping_midnight() {
    let rule = TimeRule {
      day:             "sabtu".into(),
      start_hour:      22.0,
      end_hour:        2.0,
      phase_name:      "malam".into(),
      social_status:   "sepi".into(),
      priority_places: String::new(),
    };
    for h in [23.0, 0.0, 1.0, 22.0, 2.0] {
      assert!(rule.contains_hour(h), "hour {h} should match");
    }
    for h in 3..=21 {
      assert!(!rule.contains_hour(h as f64), "hour {h} should not match");
    }
  }

  #[test]
  fn whitelist_is_normalized() {
    let rule = TimeRule {
      day:             "senin".into(),
      start_hour:      0.0,
      end_hour:        24.0,
      phase_name:      String::new(),
      social_status:   String::new(),
      priority_places: "Cafe, Taman ,".into(),
    };
    assert_eq!(rule.whitelist(), vec!["cafe", "taman"]);
  }
}
