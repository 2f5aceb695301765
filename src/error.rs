use thiserror::Error;

/// Errors surfaced by the session reducer and history edits.
///
/// None of these are fatal: the operation that produced one leaves the
/// tracker exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedingError {
    #[error("a feeding session is already in progress")]
    AlreadyActive,

    #[error("no feeding session in progress")]
    NotActive,

    #[error("feeding session is already paused")]
    AlreadyPaused,

    #[error("feeding session is not paused")]
    NotPaused,

    #[error("session must contain at least one interval")]
    EmptySession,

    #[error("interval {index}: end time cannot be before start time")]
    IntervalEndsBeforeStart { index: usize },

    #[error("paused span {index}: end time cannot be before start time")]
    PauseEndsBeforeStart { index: usize },

    #[error("interval {index} does not exist")]
    IntervalOutOfRange { index: usize },
}

pub type Result<T, E = FeedingError> = std::result::Result<T, E>;
