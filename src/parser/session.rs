use std::sync::LazyLock;

use regex::Regex;

use super::blocks::{CourseBlock, ANCHOR_RE};
use crate::model::{CourseId, Schedule, SessionRecord, Weekday};

/// Schedule line: weekday abbreviation (optional period), optional date
/// token `dd.mm.yy`/`dd.mm.yyyy`, then a start-end time range with `.` or
/// `:` as the minute separator. "Di 14:00-16:00", "Fr 12.01.24 10.00 - 12.00".
static SCHEDULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(Mo|Di|Mi|Do|Fr|Sa|So)\.?\s+(?:(\d{2}\.\d{2}\.\d{2,4})\s+)?(\d{2}[.:]\d{2})\s*-\s*(\d{2}[.:]\d{2})",
    )
    .unwrap()
});

/// Location marker: room keyword plus a token of word characters and dots,
/// e.g. "Raum B.201", "Hörsaal H2", "Aula Nord".
static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Raum|Aula|Hörsaal)\s+([\w.]+)").unwrap());

/// Sentinel for blocks and lines without any location marker.
pub const UNKNOWN_LOCATION: &str = "TBA";

/// How raw course titles are shortened. Catalogs append administrativa after
/// a hyphen ("Softwaretechnik - Modulverantwortung: …"); the two variants
/// found in the field differ on when to cut it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitlePolicy {
    /// Cut at the first hyphen whenever one is present.
    AlwaysTruncate,
    /// Cut only for two-component module ids; deeper ids (specific courses)
    /// keep the full title.
    #[default]
    DepthSensitive,
}

/// Parse one block into its session records. A block whose lines never match
/// the schedule pattern yields an empty vec — the course exists but has no
/// bookable time, which is a valid outcome.
pub fn parse_block(block: &CourseBlock<'_>, policy: TitlePolicy) -> Vec<SessionRecord> {
    let Some(caps) = ANCHOR_RE.captures(block.header()) else {
        return Vec::new();
    };
    let Some(id) = CourseId::parse(&caps[1]) else {
        return Vec::new();
    };
    let title = clean_title(&id, &caps[2], policy);

    // First location marker anywhere in the block is the default for lines
    // that carry none themselves.
    let default_location = LOCATION_RE
        .find(&block.joined())
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    let mut sessions = Vec::new();
    for line in &block.lines {
        let Some(caps) = SCHEDULE_RE.captures(line) else {
            continue;
        };
        let Some(weekday) = Weekday::parse(&caps[1]) else {
            continue;
        };
        // The weekday abbreviation is taken at face value and never
        // cross-checked against the date's actual weekday.
        let schedule = match caps.get(2) {
            Some(date) => Schedule::OneOff {
                date: normalize_year(date.as_str()),
            },
            None => Schedule::Recurring,
        };
        let location = LOCATION_RE
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| default_location.clone());

        sessions.push(SessionRecord {
            id: id.clone(),
            title: title.clone(),
            schedule,
            weekday,
            start: caps[3].replace('.', ":"),
            end: caps[4].replace('.', ":"),
            location,
        });
    }
    sessions
}

fn clean_title(id: &CourseId, raw: &str, policy: TitlePolicy) -> String {
    let truncate = match policy {
        TitlePolicy::AlwaysTruncate => true,
        TitlePolicy::DepthSensitive => id.depth() == 2,
    };
    if truncate {
        if let Some((head, _)) = raw.split_once('-') {
            return head.trim().to_string();
        }
    }
    raw.trim().to_string()
}

/// Map 2-digit years to the 2000s: "05.01.24" → "05.01.2024".
fn normalize_year(date: &str) -> String {
    let mut parts = date.splitn(3, '.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(m), Some(y)) if y.len() == 2 => format!("{d}.{m}.20{y}"),
        _ => date.to_string(),
    }
}
