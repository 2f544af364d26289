//! Overpass-style place-export ingestion.
//!
//! The export is a JSON document with a top-level `elements` list. Nodes
//! carry `lat`/`lon` directly; ways and relations exported with `out center`
//! carry them in a nested `center` object. Elements without a `name` tag or a
//! resolvable coordinate are dropped.

use std::collections::BTreeMap;

use radar_core::tables::GeoPoint;
use serde::Deserialize;

use crate::error::Result;

/// Tag keys probed for the category, in priority order.
const CATEGORY_TAG_KEYS: [&str; 4] = ["amenity", "shop", "leisure", "tourism"];

// ─── Export shape ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GeoExport {
  #[serde(default)]
  elements: Vec<RawElement>,
}

#[derive(Deserialize)]
struct RawElement {
  #[serde(default)]
  tags:   BTreeMap<String, String>,
  lat:    Option<f64>,
  lon:    Option<f64>,
  center: Option<Centroid>,
}

#[derive(Deserialize)]
struct Centroid {
  lat: f64,
  lon: f64,
}

impl RawElement {
  fn coordinates(&self) -> Option<(f64, f64)> {
    match (self.lat, self.lon) {
      (Some(lat), Some(lon)) => Some((lat, lon)),
      _ => self.center.as_ref().map(|c| (c.lat, c.lon)),
    }
  }

  fn category(&self) -> String {
    CATEGORY_TAG_KEYS
      .iter()
      .find_map(|k| self.tags.get(*k))
      .cloned()
      .unwrap_or_else(|| "unknown".to_string())
  }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a place export into geo points.
///
/// Zero valid elements yields an empty vector, not an error; malformed JSON
/// is a hard error.
pub fn parse_geo(input: &str) -> Result<Vec<GeoPoint>> {
  let export: GeoExport = serde_json::from_str(input)?;

  Ok(
    export
      .elements
      .into_iter()
      .filter_map(|el| {
        let name = el.tags.get("name")?.trim().to_string();
        if name.is_empty() {
          return None;
        }
        let (lat, lon) = el.coordinates()?;
        let category = el.category();
        Some(GeoPoint { name, lat, lon, category })
      })
      .collect(),
  )
}
