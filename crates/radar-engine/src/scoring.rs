//! Archetype scoring — step 1 of a scan.
//!
//! Every survey row contributes the size of the intersection between its
//! trait set and the requested set to its archetype's running total.
//! Accumulation order is row order, and ties between equal totals break to
//! the archetype encountered first — a documented, deterministic policy.

use std::collections::BTreeSet;

use radar_core::{Archetype, store::TraitRow, tables::split_tokens};

/// Accumulated per-archetype scores, in first-encountered order. Archetypes
/// that never scored are absent.
pub fn score_archetypes(
  rows: &[TraitRow],
  requested: &[String],
) -> Vec<(Archetype, u32)> {
  let requested: BTreeSet<String> =
    requested.iter().map(|t| t.trim().to_lowercase()).collect();

  let mut scores: Vec<(Archetype, u32)> = Vec::new();
  for row in rows {
    let row_traits: BTreeSet<String> = split_tokens(&row.traits)
      .map(|t| t.to_lowercase())
      .collect();
    let matched = row_traits.intersection(&requested).count() as u32;
    if matched == 0 {
      continue;
    }

    match scores.iter_mut().find(|(a, _)| *a == row.archetype) {
      Some((_, total)) => *total += matched,
      None => scores.push((row.archetype, matched)),
    }
  }
  scores
}

/// The winning archetype: maximum accumulated score, first-encountered on a
/// tie. `None` when nothing scored.
pub fn best_archetype(scores: &[(Archetype, u32)]) -> Option<(Archetype, u32)> {
  let mut best: Option<(Archetype, u32)> = None;
  for &(archetype, score) in scores {
    match best {
      Some((_, top)) if score <= top => {}
      _ => best = Some((archetype, score)),
    }
  }
  best
}
