//! Live weather lookup with a bounded timeout and a neutral offline default.
//!
//! The lookup is advisory: its failure must never abort an interaction, so
//! [`WeatherClient::current`] is infallible and degrades to
//! [`WeatherReport::offline`] on any error.

use std::time::Duration;

use radar_core::recommend::{WeatherKind, WeatherReport};
use reqwest::Client;
use serde::Deserialize;

use crate::error::Result;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Current-conditions client for one fixed city.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct WeatherClient {
  client:  Client,
  api_key: String,
  city:    String,
}

// ─── Response shape ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
  weather: Vec<ApiCondition>,
  main:    ApiMain,
}

#[derive(Deserialize)]
struct ApiCondition {
  main:        String,
  description: String,
}

#[derive(Deserialize)]
struct ApiMain {
  temp: f64,
}

// ─── Client ──────────────────────────────────────────────────────────────────

impl WeatherClient {
  pub fn new(api_key: impl Into<String>, city: impl Into<String>) -> Result<Self> {
    let client = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;
    Ok(Self {
      client,
      api_key: api_key.into(),
      city: city.into(),
    })
  }

  /// Fetch current conditions. Never fails: network errors, timeouts, and
  /// unexpected bodies all degrade to the neutral offline report.
  pub async fn current(&self) -> WeatherReport {
    match self.try_current().await {
      Ok(report) => report,
      Err(err) => {
        tracing::warn!(error = %err, "weather lookup failed, using offline default");
        WeatherReport::offline()
      }
    }
  }

  async fn try_current(&self) -> Result<WeatherReport> {
    let resp = self
      .client
      .get(WEATHER_URL)
      .query(&[
        ("q", self.city.as_str()),
        ("appid", self.api_key.as_str()),
        ("units", "metric"),
        ("lang", "id"),
      ])
      .send()
      .await?
      .error_for_status()?;

    let body: ApiResponse = resp.json().await?;
    let condition = body.weather.first();

    Ok(WeatherReport {
      kind:        condition
        .map_or(WeatherKind::Unknown, |c| WeatherKind::from_condition(&c.main)),
      description: condition.map_or_else(String::new, |c| c.description.clone()),
      temp_c:      body.main.temp,
      offline:     false,
    })
  }
}
