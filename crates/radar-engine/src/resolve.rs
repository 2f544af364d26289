//! Habitat candidate handling — steps 2 to 4 of a scan.
//!
//! The candidate pool is a multiset of place tokens; frequency decides the
//! chosen label. Tie-break is first-encountered, deterministic.

use radar_core::tables::split_tokens;

/// Flatten raw habitat cells into the candidate pool: comma-split, trimmed,
/// empties dropped, duplicates preserved.
pub fn collect_candidates(cells: &[String]) -> Vec<String> {
  cells
    .iter()
    .flat_map(|cell| split_tokens(cell))
    .map(str::to_string)
    .collect()
}

/// Narrow the pool to tokens containing any whitelist keyword (lowercased
/// substring match). Falls back to the unnarrowed pool when narrowing would
/// empty it — over-filtering must never produce an empty result here.
pub fn narrow_by_whitelist(
  candidates: Vec<String>,
  whitelist: &[String],
) -> Vec<String> {
  let narrowed: Vec<String> = candidates
    .iter()
    .filter(|token| {
      let token = token.to_lowercase();
      whitelist.iter().any(|keyword| token.contains(keyword.as_str()))
    })
    .cloned()
    .collect();

  if narrowed.is_empty() { candidates } else { narrowed }
}

/// The most frequent token in the pool; ties break to the token first
/// encountered. `None` on an empty pool.
pub fn most_frequent(candidates: &[String]) -> Option<String> {
  let mut counts: Vec<(&str, u32)> = Vec::new();
  for token in candidates {
    match counts.iter_mut().find(|(t, _)| *t == token) {
      Some((_, n)) => *n += 1,
      None => counts.push((token, 1)),
    }
  }

  let mut best: Option<(&str, u32)> = None;
  for &(token, count) in &counts {
    match best {
      Some((_, top)) if count <= top => {}
      _ => best = Some((token, count)),
    }
  }
  best.map(|(token, _)| token.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cells(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn collect_splits_and_trims() {
    let pool =
      collect_candidates(&cells(&["Cafe, Taman", " Cafe ", "", " , "]));
    assert_eq!(pool, vec!["Cafe", "Taman", "Cafe"]);
  }

  #[test]
  fn narrowing_keeps_substring_matches() {
    let pool = cells(&["Cafe Sudut", "Taman Siring", "Duta Mall"]);
    let narrowed =
      narrow_by_whitelist(pool, &["cafe".to_string(), "mall".to_string()]);
    assert_eq!(narrowed, vec!["Cafe Sudut", "Duta Mall"]);
  }

  #[test]
  fn narrowing_to_nothing_falls_back_to_full_pool() {
    let pool = cells(&["Taman Siring", "Perpustakaan"]);
    let narrowed = narrow_by_whitelist(pool.clone(), &["cafe".to_string()]);
    assert_eq!(narrowed, pool);
  }

  #[test]
  fn most_frequent_wins() {
    let pool = cells(&["Taman", "Cafe", "Cafe", "Taman", "Cafe"]);
    assert_eq!(most_frequent(&pool), Some("Cafe".to_string()));
  }

  #[test]
  fn frequency_tie_breaks_to_first_seen() {
    let pool = cells(&["Taman", "Cafe", "Cafe", "Taman"]);
    assert_eq!(most_frequent(&pool), Some("Taman".to_string()));
  }

  #[test]
  fn empty_pool_yields_none() {
    assert_eq!(most_frequent(&[]), None);
  }
}
