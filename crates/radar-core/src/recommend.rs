//! Engine output types — computed per query, never persisted.

use serde::{Deserialize, Serialize};

use crate::{Archetype, tables::TimeRule};

// ─── Recommendation ──────────────────────────────────────────────────────────

/// The single ranked recommendation produced by one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
  pub archetype:      Archetype,
  /// Count of matched traits accumulated for the winning archetype.
  pub score:          u32,
  /// Display title; category/area-qualified when resolved via fallback.
  pub title:          String,
  /// The bare specific place name when one was resolved, else the chosen
  /// habitat label.
  pub detail:         String,
  pub lat:            f64,
  pub lon:            f64,
  /// The requested traits, echoed back.
  pub matched_traits: Vec<String>,
}

// ─── TimeContext ─────────────────────────────────────────────────────────────

/// The currently active day/time-window rule, resolved against a clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeContext {
  pub rule: TimeRule,
  /// The lowercase day name the rule was matched under.
  pub day:  String,
  /// The fractional hour the rule was matched at.
  pub hour: f64,
}

// ─── Weather ─────────────────────────────────────────────────────────────────

/// Coarse weather condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
  Clear,
  Clouds,
  Rain,
  /// A recognized report outside the three main categories (mist, haze, …).
  Other,
  /// No report available (lookup failed or timed out).
  Unknown,
}

impl WeatherKind {
  /// Map an OpenWeatherMap `weather[0].main` value to a category.
  pub fn from_condition(main: &str) -> Self {
    match main {
      "Clear" => Self::Clear,
      "Clouds" => Self::Clouds,
      "Rain" | "Drizzle" | "Thunderstorm" => Self::Rain,
      _ => Self::Other,
    }
  }
}

/// A current-conditions report, or the neutral offline default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
  pub kind:        WeatherKind,
  pub description: String,
  pub temp_c:      f64,
  /// True when the lookup failed and the defaults below are in effect.
  pub offline:     bool,
}

impl WeatherReport {
  /// The neutral default used when the weather lookup fails or times out.
  pub fn offline() -> Self {
    Self {
      kind:        WeatherKind::Unknown,
      description: "offline".to_string(),
      temp_c:      30.0,
      offline:     true,
    }
  }
}
