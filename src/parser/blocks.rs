use std::sync::LazyLock;

use regex::Regex;

/// Anchor line: two or more dot-separated integer groups, whitespace, then a
/// title fragment. Matches "1.3 Softwaretechnik" and "1.3.2 Seminar A".
pub static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)+)\s+(.*)").unwrap());

/// Contiguous lines belonging to one course: an anchor line plus everything
/// up to (not including) the next anchor.
#[derive(Debug, Clone)]
pub struct CourseBlock<'a> {
    pub lines: Vec<&'a str>,
}

impl<'a> CourseBlock<'a> {
    pub fn header(&self) -> &'a str {
        self.lines[0]
    }

    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// Pure line grouping; block content is not interpreted here. Lines before
/// the first anchor are discarded, the trailing block closes at end of input.
pub fn segment(text: &str) -> Vec<CourseBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if ANCHOR_RE.is_match(line) {
            if !current.is_empty() {
                blocks.push(CourseBlock {
                    lines: std::mem::take(&mut current),
                });
            }
            current.push(line);
        } else if !current.is_empty() {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(CourseBlock { lines: current });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_anchor_lines_yield_no_blocks() {
        let text = "Hochschule Musterstadt\nVorlesungsverzeichnis\nStand: 18.09.2023";
        assert!(segment(text).is_empty());
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn preamble_is_discarded() {
        let text = "Fakultät für Informatik\n1.3 Softwaretechnik\nMo 10:00-12:00";
        let blocks = segment(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header(), "1.3 Softwaretechnik");
        assert_eq!(blocks[0].lines.len(), 2);
    }

    #[test]
    fn next_anchor_closes_block() {
        let text = "1.3 Softwaretechnik\nMo 10:00-12:00\n1.4 Rechnernetze\nDi 08:00-10:00\nHinweis";
        let blocks = segment(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines, vec!["1.3 Softwaretechnik", "Mo 10:00-12:00"]);
        assert_eq!(
            blocks[1].lines,
            vec!["1.4 Rechnernetze", "Di 08:00-10:00", "Hinweis"]
        );
    }

    #[test]
    fn single_component_number_is_not_an_anchor() {
        // "1 Einführung" has no dot, so it is preamble, not a course.
        let blocks = segment("1 Einführung\n1.3 Softwaretechnik");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header(), "1.3 Softwaretechnik");
    }

    #[test]
    fn catalog_fixture_segments() {
        let text = std::fs::read_to_string("tests/fixtures/catalog.txt").unwrap();
        let blocks = segment(&text);
        assert_eq!(blocks.len(), 5);
        assert!(blocks[0].header().starts_with("1.3 "));
        assert!(blocks[4].header().starts_with("4.2 "));
    }
}
