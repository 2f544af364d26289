//! Recommendation engine for the social-radar core.
//!
//! Given a set of requested traits and an optional active time window, the
//! engine scores archetypes over the survey facts, picks the winning
//! archetype's most frequent habitat label, and resolves it to coordinates
//! with a three-tier fallback (name match → category pick → city centre).
//!
//! All table access goes through [`radar_core::store::TableStore`]; the
//! engine owns no SQL and no files.

pub mod error;
pub mod resolve;
pub mod scoring;
pub mod timectx;
pub mod weather;

pub use error::{Error, Result};
pub use weather::WeatherClient;

use chrono::Utc;
use rand::seq::SliceRandom as _;

use radar_core::{
  Archetype,
  recommend::{Recommendation, TimeContext},
  store::TableStore,
  tables::Gender,
};

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The scan engine: stateless apart from its store handle and the fixed city
/// parameters.
#[derive(Clone)]
pub struct Engine<S> {
  store:       S,
  tz:          chrono_tz::Tz,
  /// Fallback coordinate when a label resolves to no known place.
  city_center: (f64, f64),
}

impl<S: TableStore> Engine<S> {
  pub fn new(store: S, tz: chrono_tz::Tz, city_center: (f64, f64)) -> Self {
    Self { store, tz, city_center }
  }

  // ── Time context ──────────────────────────────────────────────────────────

  /// Resolve the active time rule for the current instant in the engine's
  /// time zone. `None` (no active window) is a normal outcome.
  pub async fn time_context(&self) -> Result<Option<TimeContext>> {
    self.time_context_at(Utc::now().with_timezone(&self.tz)).await
  }

  /// Clock-injectable variant of [`Engine::time_context`].
  pub async fn time_context_at(
    &self,
    now: chrono::DateTime<chrono_tz::Tz>,
  ) -> Result<Option<TimeContext>> {
    let (day, hour) = timectx::local_day_and_hour(&now);
    let rules = self.store.rules_for_day(day).await.map_err(Error::store)?;
    Ok(timectx::resolve(&rules, day, hour))
  }

  // ── Scan ──────────────────────────────────────────────────────────────────

  /// Run one full scan. `Ok(None)` means "no match" — no archetype scored,
  /// or the winner has no candidate habitats.
  pub async fn scan(
    &self,
    requested: &[String],
    ctx: Option<&TimeContext>,
  ) -> Result<Option<Recommendation>> {
    let rows = self.store.trait_rows().await.map_err(Error::store)?;
    let scores = scoring::score_archetypes(&rows, requested);
    let Some((archetype, score)) = scoring::best_archetype(&scores) else {
      return Ok(None);
    };

    // Candidate pool: the winning archetype's habitats as reported for the
    // female respondent pool.
    let cells = self
      .store
      .habitats(archetype, Gender::Female)
      .await
      .map_err(Error::store)?;
    let mut pool = resolve::collect_candidates(&cells);
    if let Some(ctx) = ctx {
      pool = resolve::narrow_by_whitelist(pool, &ctx.rule.whitelist());
    }
    let Some(label) = resolve::most_frequent(&pool) else {
      return Ok(None);
    };

    let located = self.resolve_location(&label, archetype).await?;

    Ok(Some(Recommendation {
      archetype,
      score,
      title: located.title,
      detail: located.detail,
      lat: located.lat,
      lon: located.lon,
      matched_traits: requested.to_vec(),
    }))
  }

  /// Query-boundary wrapper: store failures are logged and flattened into
  /// the empty result so one bad query cannot take down an interactive
  /// session.
  pub async fn scan_or_empty(
    &self,
    requested: &[String],
    ctx: Option<&TimeContext>,
  ) -> Option<Recommendation> {
    match self.scan(requested, ctx).await {
      Ok(result) => result,
      Err(err) => {
        tracing::warn!(error = %err, "scan failed, returning empty result");
        None
      }
    }
  }

  // ── Coordinate resolution ─────────────────────────────────────────────────

  /// Three-tier fallback: name containment match, then a random point from
  /// the archetype's plausible categories, then the fixed city centre.
  async fn resolve_location(
    &self,
    label: &str,
    archetype: Archetype,
  ) -> Result<Located> {
    if let Some(point) = self
      .store
      .find_point_by_label(label)
      .await
      .map_err(Error::store)?
    {
      return Ok(Located {
        title:  point.name.clone(),
        detail: point.name,
        lat:    point.lat,
        lon:    point.lon,
      });
    }

    let candidates = self
      .store
      .points_in_categories(archetype.fallback_categories())
      .await
      .map_err(Error::store)?;
    if let Some(point) = candidates.choose(&mut rand::thread_rng()) {
      return Ok(Located {
        title:  format!("{} (Recommendation {archetype})", point.name),
        detail: point.name.clone(),
        lat:    point.lat,
        lon:    point.lon,
      });
    }

    let (lat, lon) = self.city_center;
    Ok(Located {
      title: format!("{label} (General Area)"),
      detail: label.to_string(),
      lat,
      lon,
    })
  }
}

struct Located {
  title:  String,
  detail: String,
  lat:    f64,
  lon:    f64,
}

#[cfg(test)]
mod tests;
