use chrono::{Datelike, Duration, Weekday};

use crate::model::Instant;

fn is_weekend(day: Weekday) -> bool {
  matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Elapsed time between `start` and `end` minus one full day for every
/// weekend day met while walking from `start` in 24-hour steps.
///
/// The weekday of each step is taken in the instant's own offset. The walk
/// does not snap to midnight, so a span starting on a weekend can come out
/// negative. `start >= end` yields zero.
pub fn working_duration(start: Instant, end: Instant) -> Duration {
  if end <= start {
    return Duration::zero();
  }

  let one_day = Duration::days(1);
  let mut non_working = Duration::zero();
  let mut cursor = start;

  while cursor < end {
    if is_weekend(cursor.weekday()) {
      non_working = non_working + one_day;
    }
    cursor = cursor + one_day;
  }

  (end - start) - non_working
}
