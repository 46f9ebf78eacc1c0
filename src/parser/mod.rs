pub mod blocks;
pub mod session;

pub use session::TitlePolicy;

use tracing::debug;

use crate::error::Error;
use crate::model::SessionRecord;

/// Two-pass pipeline: text → course blocks → session records.
///
/// The only structural failure is empty input; everything else degrades per
/// line (a line that matches no pattern contributes no session).
pub fn parse_catalog(text: &str, policy: TitlePolicy) -> Result<Vec<SessionRecord>, Error> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut records = Vec::new();
    for block in blocks::segment(text) {
        let sessions = session::parse_block(&block, policy);
        debug!(header = block.header(), count = sessions.len(), "parsed block");
        records.extend(sessions);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Schedule;

    #[test]
    fn empty_input_is_a_structural_error() {
        assert!(matches!(
            parse_catalog("", TitlePolicy::DepthSensitive),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            parse_catalog("  \n\t\n", TitlePolicy::DepthSensitive),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn anchorless_text_parses_to_no_records() {
        let records = parse_catalog("Nur Fließtext ohne Kennziffern", TitlePolicy::DepthSensitive)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn catalog_fixture_extracts_all_sessions() {
        let text = std::fs::read_to_string("tests/fixtures/catalog.txt").unwrap();
        let records = parse_catalog(&text, TitlePolicy::DepthSensitive).unwrap();
        assert_eq!(records.len(), 8);

        let one_offs: Vec<_> = records
            .iter()
            .filter(|r| matches!(r.schedule, Schedule::OneOff { .. }))
            .collect();
        assert_eq!(one_offs.len(), 4);

        // Module title truncated at depth 2, kept verbatim at depth 3.
        let module = records.iter().find(|r| r.id.to_string() == "1.3").unwrap();
        assert_eq!(module.title, "Softwaretechnik");
        let course = records.iter().find(|r| r.id.to_string() == "1.3.1").unwrap();
        assert_eq!(course.title, "Softwaretechnik Vorlesung - Pflicht");

        // Every session of a block shares the block-level id and title.
        let seminar: Vec<_> = records
            .iter()
            .filter(|r| r.id.to_string() == "1.3.2")
            .collect();
        assert_eq!(seminar.len(), 2);
        assert!(seminar.iter().all(|r| r.title == "Softwaretechnik Seminar"));
    }
}
