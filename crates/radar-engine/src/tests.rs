//! Integration tests for the engine against an in-memory SQLite store.

use chrono::TimeZone as _;
use chrono_tz::Asia::Makassar;
use radar_core::{
  Archetype,
  store::{TableBatch, TableStore as _},
  tables::{Gender, GeoPoint, SurveyFact, TimeRule},
};
use radar_store_sqlite::SqliteStore;

use crate::Engine;

const CITY_CENTER: (f64, f64) = (-3.3194, 114.5928);

fn fact(
  gender: Gender,
  archetype: Archetype,
  traits: &str,
  habitats: &str,
) -> SurveyFact {
  SurveyFact {
    timestamp: "2024-01-01 10:00".into(),
    gender,
    archetype,
    traits: traits.into(),
    habitats: habitats.into(),
  }
}

fn rule(day: &str, start: f64, end: f64, priority: &str) -> TimeRule {
  TimeRule {
    day:             day.into(),
    start_hour:      start,
    end_hour:        end,
    phase_name:      "phase".into(),
    social_status:   "status".into(),
    priority_places: priority.into(),
  }
}

fn point(name: &str, lat: f64, lon: f64, category: &str) -> GeoPoint {
  GeoPoint { name: name.into(), lat, lon, category: category.into() }
}

fn base_batch() -> TableBatch {
  TableBatch {
    survey: vec![
      fact(
        Gender::Female,
        Archetype::Intellectual,
        "Kacamata, Buku",
        "Perpustakaan, Cafe",
      ),
      fact(Gender::Female, Archetype::Intellectual, "Kacamata", "Perpustakaan"),
      // Male rows contribute to scoring but not to the candidate pool.
      fact(Gender::Male, Archetype::Intellectual, "Kacamata", "Warnet"),
      fact(Gender::Female, Archetype::Social, "Heels", "Mall"),
    ],
    rules:  vec![rule("senin", 7.0, 12.0, "Cafe"), rule("sabtu", 22.0, 2.0, "Mall")],
    points: vec![
      point("Perpustakaan", -3.31, 114.59, "library"),
      point("Cafe Sudut", -3.30, 114.58, "cafe"),
    ],
  }
}

async fn engine_with(batch: TableBatch) -> Engine<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  store.rebuild(batch).await.expect("rebuild");
  Engine::new(store, Makassar, CITY_CENTER)
}

fn traits(v: &[&str]) -> Vec<String> {
  v.iter().map(|s| s.to_string()).collect()
}

// ─── Scan ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn end_to_end_intellectual_scan() {
  let engine = engine_with(base_batch()).await;

  let rec = engine
    .scan(&traits(&["kacamata", "buku"]), None)
    .await
    .unwrap()
    .expect("a recommendation");

  assert_eq!(rec.archetype, Archetype::Intellectual);
  // 2 from the first row, 1 from each single-trait row.
  assert_eq!(rec.score, 4);
  assert_eq!(rec.title, "Perpustakaan");
  assert_eq!(rec.detail, "Perpustakaan");
  assert_eq!((rec.lat, rec.lon), (-3.31, 114.59));
  assert_eq!(rec.matched_traits, traits(&["kacamata", "buku"]));
}

#[tokio::test]
async fn unknown_traits_yield_empty_result() {
  let engine = engine_with(base_batch()).await;
  assert!(engine.scan(&traits(&["topi"]), None).await.unwrap().is_none());
  assert!(engine.scan(&[], None).await.unwrap().is_none());
  assert!(engine.scan_or_empty(&traits(&["topi"]), None).await.is_none());
}

#[tokio::test]
async fn time_narrowing_steers_the_pool() {
  let engine = engine_with(base_batch()).await;

  // Monday morning context whitelists "Cafe"; the pool narrows from
  // {Perpustakaan ×2, Cafe} to {Cafe}, which name-matches "Cafe Sudut".
  let now = Makassar.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
  let ctx = engine.time_context_at(now).await.unwrap().expect("a context");
  assert_eq!(ctx.day, "senin");

  let rec = engine
    .scan(&traits(&["kacamata"]), Some(&ctx))
    .await
    .unwrap()
    .expect("a recommendation");
  assert_eq!(rec.title, "Cafe Sudut");
}

#[tokio::test]
async fn narrowing_that_empties_the_pool_falls_back() {
  let mut batch = base_batch();
  batch.rules = vec![rule("senin", 0.0, 24.0, "Stadion")];
  let engine = engine_with(batch).await;

  let now = Makassar.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
  let ctx = engine.time_context_at(now).await.unwrap().expect("a context");

  // No Intellectual habitat contains "stadion" — the unfiltered pool wins.
  let rec = engine
    .scan(&traits(&["kacamata"]), Some(&ctx))
    .await
    .unwrap()
    .expect("a recommendation");
  assert_eq!(rec.title, "Perpustakaan");
}

#[tokio::test]
async fn category_fallback_qualifies_the_title() {
  let mut batch = base_batch();
  // "Mall" matches no point by name; Social's category set includes "cafe".
  batch.points = vec![point("Kopi Kita", -3.3, 114.6, "cafe")];
  let engine = engine_with(batch).await;

  let rec = engine
    .scan(&traits(&["heels"]), None)
    .await
    .unwrap()
    .expect("a recommendation");

  assert_eq!(rec.archetype, Archetype::Social);
  assert_eq!(rec.title, "Kopi Kita (Recommendation Social)");
  assert_eq!(rec.detail, "Kopi Kita");
  assert_eq!((rec.lat, rec.lon), (-3.3, 114.6));
}

#[tokio::test]
async fn area_fallback_uses_the_city_center() {
  let mut batch = base_batch();
  batch.points = Vec::new();
  let engine = engine_with(batch).await;

  let rec = engine
    .scan(&traits(&["heels"]), None)
    .await
    .unwrap()
    .expect("a recommendation");

  assert_eq!(rec.title, "Mall (General Area)");
  assert_eq!(rec.detail, "Mall");
  assert_eq!((rec.lat, rec.lon), CITY_CENTER);
}

// ─── Time context ────────────────────────────────────────────────────────────

#[tokio::test]
async fn wraparound_context_resolves_after_midnight() {
  let engine = engine_with(base_batch()).await;

  // 2024-06-09 01:00 is a Sunday... use Saturday 23:30 and Sunday has no
  // rule, so only the Saturday window applies.
  let saturday_night =
    Makassar.with_ymd_and_hms(2024, 6, 8, 23, 30, 0).unwrap();
  let ctx = engine.time_context_at(saturday_night).await.unwrap();
  assert!(ctx.is_some());

  let sunday_morning = Makassar.with_ymd_and_hms(2024, 6, 9, 9, 0, 0).unwrap();
  assert!(engine.time_context_at(sunday_morning).await.unwrap().is_none());
}

#[tokio::test]
async fn outside_all_windows_means_no_context() {
  let engine = engine_with(base_batch()).await;
  let now = Makassar.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap();
  assert!(engine.time_context_at(now).await.unwrap().is_none());
}
