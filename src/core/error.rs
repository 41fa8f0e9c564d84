use thiserror::Error;

/// Result type for the scoring and settlement engine
pub type EngineResult<T> = Result<T, EngineError>;

/// Failures of a single calculation call. None of them are retried; callers
/// render "calculation unavailable" instead of a partial payout table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("missing prediction for outcome {outcome_id} (participant {participant_id})")]
    MissingPrediction {
        participant_id: String,
        outcome_id: String,
    },

    #[error("payouts need at least 2 participants, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("missing Brier score for participant {participant_id}")]
    MissingScore { participant_id: String },

    #[error("resolved outcome {outcome_id} is not one of the wager's outcomes")]
    UnknownOutcome { outcome_id: String },

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}
