use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::model::SessionRecord;

/// Date format of normalized one-off session dates.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// ISO week numbers inside `[start, end]` with no one-off session scheduled.
///
/// The catalog lists concrete dates for sessions that actually take place,
/// so a week of the semester without any dated session is read as a holiday
/// week. Without any dated session at all there is nothing to read — the
/// result is empty (insufficient data, not "everything is a holiday").
///
/// Week numbers carry no year component; a range spanning a year boundary
/// can alias weeks of different years. Known limitation, kept as-is.
pub fn infer_holiday_weeks(
    records: &[SessionRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<u32> {
    let mut active: HashSet<u32> = HashSet::new();
    for record in records {
        let Some(date) = record.schedule.date() else {
            continue;
        };
        match NaiveDate::parse_from_str(date, DATE_FORMAT) {
            Ok(day) => {
                active.insert(day.iso_week().week());
            }
            Err(err) => debug!(date, %err, "skipping unparseable one-off date"),
        }
    }
    if active.is_empty() {
        return Vec::new();
    }

    let mut holidays = BTreeSet::new();
    let mut current = start;
    while current <= end {
        let week = current.iso_week().week();
        if !active.contains(&week) {
            holidays.insert(week);
        }
        current += Duration::days(7);
    }
    holidays.into_iter().collect()
}

/// Earliest and latest one-off dates across all records, used as the default
/// semester range when the caller supplies none.
pub fn derive_semester_range(records: &[SessionRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = records.iter().filter_map(|r| {
        r.schedule
            .date()
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
    });
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some((min, max))
}
