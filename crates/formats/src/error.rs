use thiserror::Error;

/// Document-level decode failures. Individual bad records never produce one
/// of these; they end up in [`Decoded::skipped`] instead.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("missing required path `{0}`")]
    MissingPath(&'static str),

    #[error("unexpected document shape: {0}")]
    UnexpectedShape(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Json(e.to_string())
    }
}

/// A record that was dropped while decoding a feed document.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

/// Successfully decoded records plus the ones that were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Decoded<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self::empty()
    }
}
