use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use crate::holidays::DATE_FORMAT;
use crate::model::{Schedule, SessionRecord};

/// All occurrences are civil times in this fixed timezone.
pub const TIMEZONE: Tz = chrono_tz::Europe::Berlin;

/// A single dated, timed event ready for calendar serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    pub title: String,
    pub location: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Expand records into concrete occurrences over `[start, end]`.
///
/// One-off records emit exactly one occurrence at their own date. Recurring
/// records emit one occurrence per week on their weekday, skipping weeks in
/// `holiday_weeks` individually (the stride continues past a skipped week).
/// Records whose date or time fails to parse are skipped with a warning;
/// nothing here fails the batch.
pub fn expand(
    records: &[SessionRecord],
    start: NaiveDate,
    end: NaiveDate,
    holiday_weeks: &[u32],
) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();
    for record in records {
        match &record.schedule {
            Schedule::OneOff { date } => {
                let Ok(day) = NaiveDate::parse_from_str(date, DATE_FORMAT) else {
                    warn!(label = %record.label(), %date, "skipping one-off with unparseable date");
                    continue;
                };
                occurrences.extend(build_occurrence(record, day));
            }
            Schedule::Recurring => {
                let mut day = start;
                while day.weekday() != record.weekday.to_chrono() {
                    day += Duration::days(1);
                }
                while day <= end {
                    if !holiday_weeks.contains(&day.iso_week().week()) {
                        occurrences.extend(build_occurrence(record, day));
                    }
                    day += Duration::days(7);
                }
            }
        }
    }
    occurrences
}

fn build_occurrence(record: &SessionRecord, day: NaiveDate) -> Option<Occurrence> {
    let (Some(start), Some(end)) = (localize(day, &record.start), localize(day, &record.end))
    else {
        warn!(label = %record.label(), %day, "skipping occurrence with unmappable time");
        return None;
    };
    Some(Occurrence {
        title: record.label(),
        location: record.location.clone(),
        start,
        end,
    })
}

/// Resolve a civil date + `HH:MM` to a timezone-aware instant. `None` when
/// the time does not parse or does not exist locally (spring DST gap).
fn localize(day: NaiveDate, time: &str) -> Option<DateTime<Tz>> {
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    TIMEZONE.from_local_datetime(&day.and_time(time)).earliest()
}
