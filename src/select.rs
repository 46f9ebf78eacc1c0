//! Selection operations driven by a host UI: prefix filtering, exact-
//! duplicate collapsing, and the grouped view used to pick one time-slot
//! variant per course.

use std::collections::{BTreeMap, HashSet};

use crate::model::{CourseId, SessionRecord};

/// One course with one representative record per distinct time-slot
/// signature. Single-slot groups can be auto-selected; multi-slot groups
/// (parallel seminar groups) need a choice.
#[derive(Debug, Clone)]
pub struct CourseGroup {
    pub id: CourseId,
    pub title: String,
    pub slots: Vec<SessionRecord>,
}

/// Filter by comma-separated identifier prefixes ("1.3, 4.2"). Tokens are
/// trimmed, empty tokens dropped; a record matches when its id string starts
/// with any token. An empty result means "no matches", not an error.
pub fn filter_by_prefix(records: &[SessionRecord], query: &str) -> Vec<SessionRecord> {
    let tokens: Vec<&str> = query
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    records
        .iter()
        .filter(|r| tokens.iter().any(|t| r.id.matches_prefix(t)))
        .cloned()
        .collect()
}

/// Collapse exact duplicates (same id, title, weekday, start and date);
/// the first occurrence wins, input order is preserved.
pub fn dedup_records(records: &[SessionRecord]) -> Vec<SessionRecord> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .cloned()
        .collect()
}

/// Group records by course id and title (numeric id order, then title),
/// keeping one representative per distinct slot signature inside each group.
/// An id shared by differently-titled entries ("Seminar A" / "Seminar B")
/// yields one group per title, so no variant disappears behind another.
pub fn group_for_selection(records: &[SessionRecord]) -> Vec<CourseGroup> {
    let mut groups: BTreeMap<(CourseId, String), CourseGroup> = BTreeMap::new();
    for record in records {
        let key = (record.id.clone(), record.title.clone());
        let group = groups.entry(key).or_insert_with(|| CourseGroup {
            id: record.id.clone(),
            title: record.title.clone(),
            slots: Vec::new(),
        });
        let signature = record.slot_signature();
        if !group.slots.iter().any(|s| s.slot_signature() == signature) {
            group.slots.push(record.clone());
        }
    }
    groups.into_values().collect()
}
