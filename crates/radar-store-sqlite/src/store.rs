//! [`SqliteStore`] — the SQLite implementation of [`TableStore`].

use std::{collections::BTreeSet, path::Path};

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use radar_core::{
  Archetype,
  store::{Snapshot, TableBatch, TableStore, TraitRow},
  tables::{Gender, GeoPoint, TimeRule, split_tokens},
};

use crate::{
  Error, Result,
  encode::{decode_dt, decode_uuid, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A social-radar table store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TableStore impl ─────────────────────────────────────────────────────────

impl TableStore for SqliteStore {
  type Error = Error;

  // ── Rebuild ───────────────────────────────────────────────────────────────

  async fn rebuild(&self, batch: TableBatch) -> Result<Snapshot> {
    let snapshot = Snapshot {
      snapshot_id: Uuid::new_v4(),
      rebuilt_at:  chrono::Utc::now(),
      survey_rows: batch.survey.len() as u64,
      rule_rows:   batch.rules.len() as u64,
      geo_rows:    batch.points.len() as u64,
    };

    let id_str = encode_uuid(snapshot.snapshot_id);
    let at_str = encode_dt(snapshot.rebuilt_at);
    let counts = (snapshot.survey_rows, snapshot.rule_rows, snapshot.geo_rows);

    self
      .conn
      .call(move |conn| {
        // One transaction: readers see the old snapshot until commit.
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM survey_facts", [])?;
        tx.execute("DELETE FROM time_rules", [])?;
        tx.execute("DELETE FROM geo_points", [])?;
        tx.execute("DELETE FROM snapshots", [])?;

        {
          let mut stmt = tx.prepare(
            "INSERT INTO survey_facts (timestamp, gender, archetype, traits, habitats)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for fact in &batch.survey {
            stmt.execute(rusqlite::params![
              fact.timestamp,
              fact.gender.discriminant(),
              fact.archetype.label(),
              fact.traits,
              fact.habitats,
            ])?;
          }

          let mut stmt = tx.prepare(
            "INSERT INTO time_rules
               (day, start_hour, end_hour, phase_name, social_status, priority_places)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          )?;
          for rule in &batch.rules {
            stmt.execute(rusqlite::params![
              rule.day,
              rule.start_hour,
              rule.end_hour,
              rule.phase_name,
              rule.social_status,
              rule.priority_places,
            ])?;
          }

          let mut stmt = tx.prepare(
            "INSERT INTO geo_points (name, lat, lon, category)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for point in &batch.points {
            stmt.execute(rusqlite::params![
              point.name,
              point.lat,
              point.lon,
              point.category,
            ])?;
          }
        }

        tx.execute(
          "INSERT INTO snapshots
             (snapshot_id, rebuilt_at, survey_rows, rule_rows, geo_rows)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, at_str, counts.0, counts.1, counts.2],
        )?;

        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(snapshot)
  }

  async fn snapshot(&self) -> Result<Option<Snapshot>> {
    let raw: Option<(String, String, u64, u64, u64)> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT snapshot_id, rebuilt_at, survey_rows, rule_rows, geo_rows
               FROM snapshots",
              [],
              |row| {
                Ok((
                  row.get(0)?,
                  row.get(1)?,
                  row.get(2)?,
                  row.get(3)?,
                  row.get(4)?,
                ))
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .map(|(id, at, survey_rows, rule_rows, geo_rows)| {
        Ok(Snapshot {
          snapshot_id: decode_uuid(&id)?,
          rebuilt_at: decode_dt(&at)?,
          survey_rows,
          rule_rows,
          geo_rows,
        })
      })
      .transpose()
  }

  // ── Survey reads ──────────────────────────────────────────────────────────

  async fn trait_rows(&self) -> Result<Vec<TraitRow>> {
    let raws: Vec<(String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT archetype, traits FROM survey_facts ORDER BY row_id",
        )?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(label, traits)| {
        Ok(TraitRow {
          archetype: Archetype::from_label(&label).map_err(Error::Core)?,
          traits,
        })
      })
      .collect()
  }

  async fn habitats(
    &self,
    archetype: Archetype,
    gender: Gender,
  ) -> Result<Vec<String>> {
    let archetype_str = archetype.label();
    let gender_str = gender.discriminant();

    let rows: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT habitats FROM survey_facts
           WHERE archetype = ?1 AND gender = ?2
           ORDER BY row_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![archetype_str, gender_str], |row| {
            row.get(0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn distinct_traits(&self) -> Result<Vec<String>> {
    let cells: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT traits FROM survey_facts")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // Tokenize in Rust; the cells are free text, not a normalized column.
    let mut tokens = BTreeSet::new();
    for cell in &cells {
      for token in split_tokens(cell) {
        if token.chars().count() > 2 {
          tokens.insert(token.to_string());
        }
      }
    }
    Ok(tokens.into_iter().collect())
  }

  // ── Rule reads ────────────────────────────────────────────────────────────

  async fn rules_for_day(&self, day: &str) -> Result<Vec<TimeRule>> {
    let day = day.to_string();

    let rules: Vec<TimeRule> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT day, start_hour, end_hour, phase_name, social_status, priority_places
           FROM time_rules
           WHERE day = ?1
           ORDER BY row_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![day], |row| {
            Ok(TimeRule {
              day:             row.get(0)?,
              start_hour:      row.get(1)?,
              end_hour:        row.get(2)?,
              phase_name:      row.get(3)?,
              social_status:   row.get(4)?,
              priority_places: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rules)
  }

  // ── Geo reads ─────────────────────────────────────────────────────────────

  async fn find_point_by_label(&self, label: &str) -> Result<Option<GeoPoint>> {
    let label = label.to_string();

    let point: Option<GeoPoint> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              // Bidirectional containment, both sides lowercased; the label
              // is always bound as a parameter, never spliced into the SQL.
              // A `%` or `_` in the label acts as a LIKE wildcard, widening
              // an already-fuzzy match; habitat labels are free text and in
              // practice never carry those characters.
              "SELECT name, lat, lon, category FROM geo_points
               WHERE lower(name) LIKE '%' || lower(?1) || '%'
                  OR lower(?1) LIKE '%' || lower(name) || '%'
               LIMIT 1",
              rusqlite::params![label],
              |row| {
                Ok(GeoPoint {
                  name:     row.get(0)?,
                  lat:      row.get(1)?,
                  lon:      row.get(2)?,
                  category: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(point)
  }

  async fn points_in_categories(
    &self,
    categories: &[&str],
  ) -> Result<Vec<GeoPoint>> {
    if categories.is_empty() {
      return Ok(Vec::new());
    }

    let categories: Vec<String> =
      categories.iter().map(|c| c.to_string()).collect();

    let points: Vec<GeoPoint> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; categories.len()].join(", ");
        let sql = format!(
          "SELECT name, lat, lon, category FROM geo_points
           WHERE category IN ({placeholders})
           ORDER BY row_id"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(categories.iter()), |row| {
            Ok(GeoPoint {
              name:     row.get(0)?,
              lat:      row.get(1)?,
              lon:      row.get(2)?,
              category: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(points)
  }
}
