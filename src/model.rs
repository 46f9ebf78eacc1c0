use std::fmt;

use serde::Serialize;

/// Dotted hierarchical course identifier, e.g. `1.3` (module) or `1.3.2`
/// (specific course inside a module). Always at least two components.
///
/// Ordering is numeric per component, so `1.10` sorts after `1.9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId {
    components: Vec<u32>,
}

impl CourseId {
    pub fn parse(s: &str) -> Option<Self> {
        let components: Vec<u32> = s
            .split('.')
            .map(|part| part.parse().ok())
            .collect::<Option<_>>()?;
        if components.len() < 2 {
            return None;
        }
        Some(CourseId { components })
    }

    /// Number of dot-separated components (`1.3` → 2, `1.3.2` → 3).
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Prefix match on the dotted string form. Query `1.3` matches `1.3`,
    /// `1.3.1` and also `1.30` — plain string semantics, kept as-is.
    pub fn matches_prefix(&self, query: &str) -> bool {
        self.to_string().starts_with(query)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Serialize for CourseId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Weekday as abbreviated in the catalog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Weekday {
    Mo,
    Di,
    Mi,
    Do,
    Fr,
    Sa,
    So,
}

impl Weekday {
    pub fn parse(abbr: &str) -> Option<Self> {
        Some(match abbr {
            "Mo" => Weekday::Mo,
            "Di" => Weekday::Di,
            "Mi" => Weekday::Mi,
            "Do" => Weekday::Do,
            "Fr" => Weekday::Fr,
            "Sa" => Weekday::Sa,
            "So" => Weekday::So,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Mo => "Mo",
            Weekday::Di => "Di",
            Weekday::Mi => "Mi",
            Weekday::Do => "Do",
            Weekday::Fr => "Fr",
            Weekday::Sa => "Sa",
            Weekday::So => "So",
        }
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Mo => chrono::Weekday::Mon,
            Weekday::Di => chrono::Weekday::Tue,
            Weekday::Mi => chrono::Weekday::Wed,
            Weekday::Do => chrono::Weekday::Thu,
            Weekday::Fr => chrono::Weekday::Fri,
            Weekday::Sa => chrono::Weekday::Sat,
            Weekday::So => chrono::Weekday::Sun,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a session takes place: on one specific date, or weekly.
///
/// The date stays a normalized `dd.mm.yyyy` string and is parsed lazily at
/// the point of use, so a malformed date in the source text degrades to a
/// skipped occurrence instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    OneOff { date: String },
    Recurring,
}

impl Schedule {
    pub fn date(&self) -> Option<&str> {
        match self {
            Schedule::OneOff { date } => Some(date),
            Schedule::Recurring => None,
        }
    }
}

/// One scheduled session extracted from a single line of a course block.
///
/// `id` and `title` are block-level (shared by every session of the block);
/// the remaining fields are line-level. `start`/`end` are normalized `HH:MM`
/// strings; no `end > start` invariant is enforced — malformed ranges in the
/// source pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub id: CourseId,
    pub title: String,
    #[serde(flatten)]
    pub schedule: Schedule,
    pub weekday: Weekday,
    pub start: String,
    pub end: String,
    pub location: String,
}

impl SessionRecord {
    /// Composed event summary, e.g. "1.3.2 Softwaretechnik Seminar".
    pub fn label(&self) -> String {
        format!("{} {}", self.id, self.title)
    }

    /// Groups distinct time-slot variants under one identifier, so a
    /// selection UI can present one representative per slot.
    pub fn slot_signature(&self) -> String {
        format!(
            "{} {}-{} @ {}",
            self.weekday, self.start, self.end, self.location
        )
    }

    /// Full-record key used to collapse exact duplicates before expansion.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.id,
            self.title,
            self.weekday,
            self.start,
            self.schedule.date().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: Option<&str>) -> SessionRecord {
        SessionRecord {
            id: CourseId::parse("1.3.2").unwrap(),
            title: "Softwaretechnik Seminar".into(),
            schedule: match date {
                Some(d) => Schedule::OneOff { date: d.into() },
                None => Schedule::Recurring,
            },
            weekday: Weekday::Di,
            start: "14:00".into(),
            end: "16:00".into(),
            location: "Raum C.105".into(),
        }
    }

    #[test]
    fn course_id_roundtrip() {
        let id = CourseId::parse("1.3.2").unwrap();
        assert_eq!(id.to_string(), "1.3.2");
        assert_eq!(id.depth(), 3);
    }

    #[test]
    fn course_id_rejects_single_component() {
        assert!(CourseId::parse("1").is_none());
        assert!(CourseId::parse("").is_none());
        assert!(CourseId::parse("1.a").is_none());
    }

    #[test]
    fn course_id_numeric_ordering() {
        let a = CourseId::parse("1.9").unwrap();
        let b = CourseId::parse("1.10").unwrap();
        assert!(a < b);
    }

    #[test]
    fn prefix_match_is_string_based() {
        let id = CourseId::parse("1.30").unwrap();
        assert!(id.matches_prefix("1.3"));
        assert!(id.matches_prefix("1.30"));
        assert!(!id.matches_prefix("1.4"));
    }

    #[test]
    fn own_id_matches_itself() {
        let id = CourseId::parse("4.2").unwrap();
        assert!(id.matches_prefix(&id.to_string()));
    }

    #[test]
    fn weekday_parse() {
        assert_eq!(Weekday::parse("Di"), Some(Weekday::Di));
        assert_eq!(Weekday::parse("Xx"), None);
        assert_eq!(Weekday::Di.to_chrono(), chrono::Weekday::Tue);
    }

    #[test]
    fn label_and_signature() {
        let r = record(None);
        assert_eq!(r.label(), "1.3.2 Softwaretechnik Seminar");
        assert_eq!(r.slot_signature(), "Di 14:00-16:00 @ Raum C.105");
    }

    #[test]
    fn dedup_key_distinguishes_dates() {
        let a = record(Some("09.01.2024"));
        let b = record(Some("16.01.2024"));
        let c = record(Some("09.01.2024"));
        assert_ne!(a.dedup_key(), b.dedup_key());
        assert_eq!(a.dedup_key(), c.dedup_key());
    }

    #[test]
    fn json_shape_carries_kind_tag() {
        let json = serde_json::to_value(record(Some("09.01.2024"))).unwrap();
        assert_eq!(json["kind"], "one_off");
        assert_eq!(json["date"], "09.01.2024");
        assert_eq!(json["id"], "1.3.2");
        let json = serde_json::to_value(record(None)).unwrap();
        assert_eq!(json["kind"], "recurring");
    }
}
