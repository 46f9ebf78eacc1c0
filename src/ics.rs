//! iCalendar serialization (RFC 5545 subset).
//!
//! Recurring sessions arrive pre-expanded into dated occurrences, so no
//! RRULEs are emitted — holiday weeks are represented as plain omissions.

use chrono::{DateTime, Utc};

use crate::expand::Occurrence;

const PRODID: &str = "-//kursplan//DE";

/// Serialize occurrences as a VCALENDAR with one VEVENT each. Timestamps are
/// encoded as UTC instants; UIDs are content-derived and deterministic.
pub fn serialize(occurrences: &[Occurrence]) -> String {
    let dtstamp = format_utc(Utc::now());
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{PRODID}"));

    for (i, occ) in occurrences.iter().enumerate() {
        let start = format_utc(occ.start.with_timezone(&Utc));
        let end = format_utc(occ.end.with_timezone(&Utc));
        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("UID:{start}-{i}@kursplan"));
        push_line(&mut out, &format!("DTSTAMP:{dtstamp}"));
        push_line(&mut out, &format!("DTSTART:{start}"));
        push_line(&mut out, &format!("DTEND:{end}"));
        push_line(&mut out, &format!("SUMMARY:{}", escape_text(&occ.title)));
        push_line(&mut out, &format!("LOCATION:{}", escape_text(&occ.location)));
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// RFC 5545 §3.3.11 text escaping: backslash, semicolon, comma, newline.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            ';' => escaped.push_str(r"\;"),
            ',' => escaped.push_str(r"\,"),
            '\n' => escaped.push_str(r"\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Append a content line, folding at 75 octets with a single-space
/// continuation (RFC 5545 §3.1). Folds only at char boundaries.
fn push_line(out: &mut String, line: &str) {
    const LIMIT: usize = 75;
    let mut remaining = line;
    let mut first = true;
    while !remaining.is_empty() {
        let limit = if first { LIMIT } else { LIMIT - 1 };
        let mut split = remaining.len().min(limit);
        while !remaining.is_char_boundary(split) {
            split -= 1;
        }
        let (chunk, rest) = remaining.split_at(split);
        if !first {
            out.push(' ');
        }
        out.push_str(chunk);
        out.push_str("\r\n");
        remaining = rest;
        first = false;
    }
}
