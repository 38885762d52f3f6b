use thiserror::Error;

use crate::llm_client::LlmError;

/// Corrective message shown when a plan is requested with nothing selected.
pub const SELECT_AT_LEAST_ONE_SKILL: &str = "Please select at least one skill to practice.";

/// Failure taxonomy for the planner. Used for diagnostics; users only ever see the
/// generic per-operation message, except for `InvalidSelection`.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("AI service returned no text")]
    EmptyResponse,

    #[error("AI response did not match the expected shape: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("AI service did not answer within {seconds}s")]
    DeadlineExceeded { seconds: u64 },

    #[error("AI service call failed: {0}")]
    Service(#[from] LlmError),

    #[error("{}", SELECT_AT_LEAST_ONE_SKILL)]
    InvalidSelection,

    #[error("'{value}' is not a configured {kind}")]
    UnknownLabel { kind: &'static str, value: String },

    #[error("'{0}' is not a skill of the current job summary")]
    UnknownSkill(String),
}
