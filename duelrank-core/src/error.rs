/// Error types for the ranking core.
///
/// Every variant is a contract violation by the caller. Nothing here is
/// transient, so callers should surface these rather than retry.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// `start` was given a source collection with no items.
    #[error("cannot rank an empty collection")]
    EmptyCollection,

    /// A decision tree was requested over a list shorter than one element.
    #[error("invalid decision tree range: list length {length} (need at least 1)")]
    InvalidRange { length: usize },

    /// A comparison or decision was requested after the session completed.
    #[error("no pending comparison: the session is complete")]
    NoPendingComparison,

    /// The final list was requested before every item was ranked.
    #[error("ranking is incomplete: {ranked} of {total} items ranked")]
    Incomplete { ranked: usize, total: usize },
}

impl RankError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyCollection => "empty_collection",
            Self::InvalidRange { .. } => "invalid_range",
            Self::NoPendingComparison => "no_pending_comparison",
            Self::Incomplete { .. } => "incomplete",
        }
    }
}

pub type Result<T> = std::result::Result<T, RankError>;
