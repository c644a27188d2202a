//! Host loop and configuration errors
//!
//! The composition layer itself never fails; these errors only come from the
//! host loop driving a program and from loading its configuration.

use serde::{Deserialize, Serialize};

/// Error raised while driving a program through [`crate::Runtime`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RuntimeError {
    /// A drain processed more messages than the configured budget.
    ///
    /// Usually a message that keeps re-delivering itself, for example an
    /// emission router that matches a message its own update re-issues.
    #[error("Step budget exceeded: more than {limit} messages in one drain")]
    StepBudgetExceeded {
        /// Configured `max_steps_per_drain`
        limit: usize,
    },

    /// No element with the requested id listens to the requested event.
    #[error("No '{event}' listener on element '{id}'")]
    TargetNotFound {
        /// Element id searched for
        id: String,
        /// Event name searched for
        event: String,
    },
}

impl RuntimeError {
    /// Create a step budget error
    pub fn step_budget_exceeded(limit: usize) -> Self {
        Self::StepBudgetExceeded { limit }
    }

    /// Create a missing target error
    pub fn target_not_found(id: impl Into<String>, event: impl Into<String>) -> Self {
        Self::TargetNotFound {
            id: id.into(),
            event: event.into(),
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StepBudgetExceeded { .. } => "RUNTIME_STEP_BUDGET_EXCEEDED",
            Self::TargetNotFound { .. } => "RUNTIME_TARGET_NOT_FOUND",
        }
    }
}

/// Error raised while loading a [`crate::RuntimeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("Config parse error: {message}")]
    Parse {
        /// Parser message
        message: String,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("Invalid config: {message}")]
    Invalid {
        /// Description of the offending value
        message: String,
    },
}

impl ConfigError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "CONFIG_PARSE",
            Self::Invalid { .. } => "CONFIG_INVALID",
        }
    }
}
