use thiserror::Error;

/// Rejected-action taxonomy. All variants are recoverable: the action is
/// dropped, no state was written, and the caller may re-issue later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("not enough {currency}: need {needed}, have {available}")]
    InsufficientResources {
        currency: &'static str,
        needed: u64,
        available: u64,
    },

    #[error("unknown or unavailable target: {0}")]
    InvalidTarget(String),

    #[error("prerequisite not met: requires {0}")]
    PrerequisiteNotMet(String),

    #[error("session is not running")]
    NotRunning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_human_readable() {
        let err = ActionError::InsufficientResources {
            currency: "essence",
            needed: 25,
            available: 10,
        };
        assert_eq!(err.to_string(), "not enough essence: need 25, have 10");
        assert_eq!(
            ActionError::InvalidTarget("str_9".into()).to_string(),
            "unknown or unavailable target: str_9"
        );
        assert_eq!(
            ActionError::NotRunning.to_string(),
            "session is not running"
        );
    }
}
