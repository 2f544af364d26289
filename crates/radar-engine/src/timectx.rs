//! Time-context resolution — which rule window, if any, is active now.
//!
//! The rule table keys days by lowercase Indonesian names; the clock side is
//! a fixed regional time zone supplied by the caller. Matching is pure so it
//! can be tested without a clock.

use chrono::{Datelike as _, Timelike as _, Weekday};
use radar_core::{recommend::TimeContext, tables::TimeRule};

/// Lowercase day names in the rule table, Monday first.
pub const DAY_NAMES: [&str; 7] =
  ["senin", "selasa", "rabu", "kamis", "jumat", "sabtu", "minggu"];

/// The rule table's day name for a weekday.
pub fn day_name(weekday: Weekday) -> &'static str {
  DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Hours-plus-minutes as a fractional hour (seconds ignored, matching the
/// rule table's granularity).
pub fn fractional_hour<T: chrono::Timelike>(t: &T) -> f64 {
  f64::from(t.hour()) + f64::from(t.minute()) / 60.0
}

/// Resolve the active context among `rules` (already filtered to one day).
/// The first window containing `hour` wins; no match means no active context,
/// which is not an error.
pub fn resolve(rules: &[TimeRule], day: &str, hour: f64) -> Option<TimeContext> {
  rules
    .iter()
    .find(|rule| rule.contains_hour(hour))
    .map(|rule| TimeContext {
      rule: rule.clone(),
      day:  day.to_string(),
      hour,
    })
}

/// Day name and fractional hour of a zoned instant.
pub fn local_day_and_hour<Tz: chrono::TimeZone>(
  now: &chrono::DateTime<Tz>,
) -> (&'static str, f64) {
  (day_name(now.weekday()), fractional_hour(now))
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;
  use chrono_tz::Asia::Makassar;

  use super::*;

  fn rule(day: &str, start: f64, end: f64, phase: &str) -> TimeRule {
    TimeRule {
      day:             day.to_string(),
      start_hour:      start,
      end_hour:        end,
      phase_name:      phase.to_string(),
      social_status:   String::new(),
      priority_places: String::new(),
    }
  }

  #[test]
  fn weekday_names() {
    assert_eq!(day_name(Weekday::Mon), "senin");
    assert_eq!(day_name(Weekday::Fri), "jumat");
    assert_eq!(day_name(Weekday::Sun), "minggu");
  }

  #[test]
  fn fractional_hours() {
    // 2024-06-03 is a Monday.
    let t = Makassar.with_ymd_and_hms(2024, 6, 3, 7, 30, 59).unwrap();
    let (day, hour) = local_day_and_hour(&t);
    assert_eq!(day, "senin");
    assert_eq!(hour, 7.5);
  }

  #[test]
  fn first_containing_window_wins() {
    let rules = vec![
      rule("senin", 6.0, 9.0, "pagi"),
      rule("senin", 8.0, 12.0, "siang"),
    ];
    let ctx = resolve(&rules, "senin", 8.5).unwrap();
    assert_eq!(ctx.rule.phase_name, "pagi");
    assert_eq!(ctx.day, "senin");
    assert_eq!(ctx.hour, 8.5);
  }

  #[test]
  fn wraparound_window_matches_across_midnight() {
    let rules = vec![rule("sabtu", 22.0, 2.0, "malam")];
    for hour in [23.0, 0.5, 1.99] {
      assert!(resolve(&rules, "sabtu", hour).is_some(), "hour {hour}");
    }
    for hour in [3.0, 12.0, 21.0] {
      assert!(resolve(&rules, "sabtu", hour).is_none(), "hour {hour}");
    }
  }

  #[test]
  fn no_rules_means_no_context() {
    assert!(resolve(&[], "senin", 10.0).is_none());
  }
}
