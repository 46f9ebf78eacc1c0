use thiserror::Error;

/// Structural failures only. Per-line and per-record problems (unmatched
/// schedule patterns, malformed dates or times) are contained locally with
/// skip-and-continue semantics and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input text is empty")]
    EmptyInput,
}
