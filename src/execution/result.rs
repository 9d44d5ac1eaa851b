use serde::{Deserialize, Serialize};

/// Terminal status of a single execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// The trajectory ran to completion.
    Success,
    /// The user canceled execution; not an error.
    Canceled,
    /// A runtime condition stopped the motion (safety abort, battery
    /// depletion). The caller should re-plan before re-invoking.
    ExecutionFailure,
    /// Caller misuse detected before motion started (no robot, degenerate
    /// path, trajectory generation failure). Never retried internally.
    PreconditionFailure,
}

/// Outcome of one `execute` call: a status plus a human-readable message.
///
/// Control decisions belong on the status alone; the message is the audit
/// trail of *why*.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    pub message: String,
}

impl ExecutionResult {
    pub fn new(status: ExecutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(ExecutionResult::new(ExecutionStatus::Success, "").is_success());
        assert!(!ExecutionResult::new(ExecutionStatus::Canceled, "canceled").is_success());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ExecutionStatus::PreconditionFailure).unwrap();
        assert_eq!(json, "\"precondition_failure\"");
    }
}
