//! The `TableStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `radar-store-sqlite`).
//! Higher layers (`radar-engine`, `radar-cli`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Archetype,
  tables::{Gender, GeoPoint, SurveyFact, TimeRule},
};

// ─── Rebuild types ───────────────────────────────────────────────────────────

/// The in-memory output of one full ETL run — everything a rebuild replaces
/// the store's contents with.
#[derive(Debug, Clone, Default)]
pub struct TableBatch {
  pub survey: Vec<SurveyFact>,
  pub rules:  Vec<TimeRule>,
  pub points: Vec<GeoPoint>,
}

/// The recorded identity of one full rebuild. Written atomically with the
/// data, so a reader observing this snapshot row observes the matching
/// tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
  pub snapshot_id: Uuid,
  pub rebuilt_at:  DateTime<Utc>,
  pub survey_rows: u64,
  pub rule_rows:   u64,
  pub geo_rows:    u64,
}

// ─── Read projections ────────────────────────────────────────────────────────

/// The scoring projection of a survey fact: archetype plus its raw trait
/// cell. Habitats and timestamps are not needed for scoring.
#[derive(Debug, Clone)]
pub struct TraitRow {
  pub archetype: Archetype,
  pub traits:    String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a social-radar table store backend.
///
/// Writes happen only through [`TableStore::rebuild`], which replaces all
/// three tables wholesale. Reads are safe to run concurrently with each
/// other; a rebuild must be atomic with respect to readers (they see the
/// previous complete snapshot or the new one, never a mix).
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait TableStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Rebuild ───────────────────────────────────────────────────────────

  /// Replace the store's entire contents with `batch` and record a new
  /// [`Snapshot`].
  fn rebuild(
    &self,
    batch: TableBatch,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// The most recent rebuild's snapshot, or `None` if the store has never
  /// been rebuilt.
  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Option<Snapshot>, Self::Error>> + Send + '_;

  // ── Survey reads ──────────────────────────────────────────────────────

  /// All survey rows projected to (archetype, traits), in insertion order.
  fn trait_rows(
    &self,
  ) -> impl Future<Output = Result<Vec<TraitRow>, Self::Error>> + Send + '_;

  /// The raw habitat cells of all survey rows for `archetype` restricted to
  /// `gender`, in insertion order.
  fn habitats(
    &self,
    archetype: Archetype,
    gender: Gender,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Distinct trait tokens across the whole survey, sorted; short noise
  /// tokens (< 3 chars) dropped. Feeds the trait picker.
  fn distinct_traits(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Rule reads ────────────────────────────────────────────────────────

  /// All time rules for a lowercase day name, in insertion order.
  fn rules_for_day<'a>(
    &'a self,
    day: &'a str,
  ) -> impl Future<Output = Result<Vec<TimeRule>, Self::Error>> + Send + 'a;

  // ── Geo reads ─────────────────────────────────────────────────────────

  /// First geo point whose name and `label` contain each other in either
  /// direction, case-insensitively. `None` on miss or an empty dimension.
  /// The match is deliberately fuzzy: which of several containing points is
  /// first is backend-defined, and LIKE metacharacters in `label` widen the
  /// match rather than being escaped.
  fn find_point_by_label<'a>(
    &'a self,
    label: &'a str,
  ) -> impl Future<Output = Result<Option<GeoPoint>, Self::Error>> + Send + 'a;

  /// All geo points whose category is in `categories`.
  fn points_in_categories<'a>(
    &'a self,
    categories: &'a [&'a str],
  ) -> impl Future<Output = Result<Vec<GeoPoint>, Self::Error>> + Send + 'a;
}
