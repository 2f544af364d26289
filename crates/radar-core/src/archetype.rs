//! The archetype taxonomy — the closed set of persona categories the survey
//! describes, plus the keyword tables that hang off each category.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Archetype ───────────────────────────────────────────────────────────────

/// A coarse persona category derived from clustering physical-trait
/// descriptors. The set is closed: the survey schema has one column group per
/// variant and nothing else.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Archetype {
  Intellectual,
  Creative,
  Social,
  Sporty,
  Techie,
  Religius,
  Active,
}

impl Archetype {
  /// All variants, in survey column order.
  pub const ALL: [Archetype; 7] = [
    Archetype::Intellectual,
    Archetype::Creative,
    Archetype::Social,
    Archetype::Sporty,
    Archetype::Techie,
    Archetype::Religius,
    Archetype::Active,
  ];

  /// The column prefix used by the wide survey schema
  /// (`{prefix}_fisik_cowo`, `{prefix}_fisik_cewe`, `{prefix}_lokasi`).
  pub fn column_prefix(self) -> &'static str {
    match self {
      Self::Intellectual => "intel",
      Self::Creative => "creative",
      Self::Social => "social",
      Self::Sporty => "sporty",
      Self::Techie => "techie",
      Self::Religius => "relig",
      Self::Active => "active",
    }
  }

  /// Human-readable label; also the discriminant stored in the database.
  pub fn label(self) -> &'static str {
    match self {
      Self::Intellectual => "Intellectual",
      Self::Creative => "Creative",
      Self::Social => "Social",
      Self::Sporty => "Sporty",
      Self::Techie => "Techie",
      Self::Religius => "Religius",
      Self::Active => "Active",
    }
  }

  pub fn from_label(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|a| a.label() == s)
      .ok_or_else(|| Error::UnknownArchetype(s.to_string()))
  }

  /// Geo-point categories considered plausible habitats for this archetype.
  /// Used by the engine's category fallback when no place matches the chosen
  /// label by name.
  pub fn fallback_categories(self) -> &'static [&'static str] {
    match self {
      Self::Intellectual => &["library", "book_shop", "university", "college"],
      Self::Social => &["cafe", "restaurant", "fast_food", "mall", "clothing"],
      Self::Sporty => &["gym", "park", "pitch", "stadium"],
      Self::Creative => &["arts_centre", "gallery", "cafe", "museum"],
      Self::Religius => &["place_of_worship", "mosque"],
      Self::Techie => &["cafe", "coworking_space"],
      // No curated set for this one; the generic social pair is the default.
      Self::Active => &["cafe", "restaurant"],
    }
  }
}

impl std::fmt::Display for Archetype {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

// ─── Keyword classifier ──────────────────────────────────────────────────────

/// Declarative keyword→archetype table for classifying free-text trait
/// descriptions. First matching row wins, so more specific categories come
/// before broader ones.
const CLASSIFIER: &[(Archetype, &[&str])] = &[
  (Archetype::Intellectual, &["kaca", "buku", "laptop", "seminar", "kemeja"]),
  (Archetype::Social, &["branded", "heels", "parfum", "makeup"]),
  (Archetype::Sporty, &["jersey", "training", "sneaker", "running"]),
  (Archetype::Creative, &["kamera", "analog", "seni", "art", "batik"]),
  (Archetype::Active, &["organisasi", "id card", "kpu"]),
];

/// Classify a free-text trait description by keyword containment.
/// Returns `None` when no keyword matches.
pub fn classify(text: &str) -> Option<Archetype> {
  let text = text.to_lowercase();
  CLASSIFIER
    .iter()
    .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
    .map(|(archetype, _)| *archetype)
}
