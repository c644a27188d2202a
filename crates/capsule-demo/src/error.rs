//! Demo error types

use capsule_core::RuntimeError;
use thiserror::Error;

/// Errors raised while parsing or running a session script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// A step is not of the form `kind:argument`
    #[error("Malformed step `{step}`: expected kind:argument")]
    Malformed {
        /// The offending step
        step: String,
    },
    /// Step kind not recognised
    #[error("Unknown step kind `{kind}`")]
    UnknownStep {
        /// The offending kind
        kind: String,
    },
    /// `nav:` named a route that does not exist
    #[error("Unknown route `{route}`")]
    UnknownRoute {
        /// The offending route name
        route: String,
    },
    /// `wait:` argument is not a millisecond count
    #[error("Invalid wait `{value}`: expected milliseconds")]
    InvalidWait {
        /// The offending value
        value: String,
    },
    /// The host loop rejected a step
    #[error("Step `{step}` failed: {source}")]
    Runtime {
        /// The step being executed
        step: String,
        /// Underlying host error
        source: RuntimeError,
    },
}

impl ScriptError {
    /// Create a malformed-step error
    pub fn malformed(step: impl Into<String>) -> Self {
        Self::Malformed { step: step.into() }
    }

    /// Create an unknown-step error
    pub fn unknown_step(kind: impl Into<String>) -> Self {
        Self::UnknownStep { kind: kind.into() }
    }

    /// Create an unknown-route error
    pub fn unknown_route(route: impl Into<String>) -> Self {
        Self::UnknownRoute {
            route: route.into(),
        }
    }

    /// Create an invalid-wait error
    pub fn invalid_wait(value: impl Into<String>) -> Self {
        Self::InvalidWait {
            value: value.into(),
        }
    }

    /// Wrap a host loop error raised while executing `step`
    pub fn runtime(step: impl ToString, source: RuntimeError) -> Self {
        Self::Runtime {
            step: step.to_string(),
            source,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "SCRIPT_MALFORMED",
            Self::UnknownStep { .. } => "SCRIPT_UNKNOWN_STEP",
            Self::UnknownRoute { .. } => "SCRIPT_UNKNOWN_ROUTE",
            Self::InvalidWait { .. } => "SCRIPT_INVALID_WAIT",
            Self::Runtime { source, .. } => source.code(),
        }
    }
}
