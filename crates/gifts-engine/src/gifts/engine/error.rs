use crate::gifts::bank::Gift;

/// Malformed response vector or tie-break triple. Always a caller bug; retrying with the same
/// data fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("expected {expected} {what}, received {actual}")]
    WrongLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{what} at index {index} must be between 1 and 5 (found {value})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        value: i32,
    },
}

/// The engine was asked to run a step whose preconditions do not hold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreconditionError {
    #[error("tie-break requested for a result that does not need one (margin {margin:.3})")]
    TiebreakNotRequired { margin: f64 },
    #[error("base result has no score for candidate gift {0}")]
    MissingCandidate(Gift),
    #[error("primary and secondary candidates are both {0}")]
    DuplicateCandidate(Gift),
    #[error("ranking needs at least two gifts (found {count})")]
    TooFewGifts { count: usize },
    #[error("trait window holds {len} attempts; at most {max} are allowed")]
    HistoryTooLong { len: usize, max: usize },
    #[error("attempt history is not oldest-first (attempt {index} predates its predecessor)")]
    HistoryOutOfOrder { index: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),
}
