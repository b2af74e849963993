use crate::time::TimeError;

/// errors surfaced by the planning engine to its caller. input errors are
/// caught at the validator and never reach the planner; oracle errors are
/// absorbed internally and never surface at all (see [`crate::oracle`]).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TrailmapError {
    #[error("bad input in field '{field}': {reason}")]
    BadInput { field: String, reason: String },

    #[error("directions oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("could not produce a plan: {reason}")]
    PlanFailed { reason: String },
}

impl TrailmapError {
    pub fn bad_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TrailmapError::BadInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn plan_failed(reason: impl Into<String>) -> Self {
        TrailmapError::PlanFailed {
            reason: reason.into(),
        }
    }
}

/// shorthand used throughout the crate.
pub type TrailmapResult<T> = Result<T, TrailmapError>;

impl From<TimeError> for TrailmapError {
    fn from(value: TimeError) -> Self {
        TrailmapError::BadInput {
            field: "time".to_string(),
            reason: value.to_string(),
        }
    }
}
