//! Error types for feed adapters.

use std::fmt;

use thiserror::Error;

/// Which upstream feed an error belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Frontline,
    Aircraft,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Frontline => write!(f, "frontline"),
            FeedKind::Aircraft => write!(f, "aircraft"),
        }
    }
}

/// Feed-level failures. Any of these aborts map construction.
#[derive(Debug, Error, PartialEq)]
pub enum FeedError {
    /// Transport failure, timeout, or non-success HTTP status.
    #[error("{feed} feed unavailable: {reason}")]
    Unavailable { feed: FeedKind, reason: String },

    /// Body is not UTF-8, not JSON, or lacks the expected structure.
    #[error("{feed} feed could not be parsed: {reason}")]
    Parse { feed: FeedKind, reason: String },
}

impl FeedError {
    pub fn feed(&self) -> FeedKind {
        match self {
            FeedError::Unavailable { feed, .. } | FeedError::Parse { feed, .. } => *feed,
        }
    }
}
