//! Host loop configuration

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Default number of messages a single drain may process.
pub const DEFAULT_MAX_STEPS_PER_DRAIN: usize = 10_000;

/// Configuration for [`crate::Runtime`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Upper bound on messages processed by one call to `run_until_idle`.
    pub max_steps_per_drain: usize,
    /// Emit a `trace` event for every dispatched message.
    pub trace_messages: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_steps_per_drain: DEFAULT_MAX_STEPS_PER_DRAIN,
            trace_messages: false,
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps_per_drain == 0 {
            return Err(ConfigError::invalid(
                "max_steps_per_drain must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Override the drain budget.
    pub fn with_max_steps_per_drain(mut self, limit: usize) -> Self {
        self.max_steps_per_drain = limit;
        self
    }

    /// Toggle per-message tracing.
    pub fn with_trace_messages(mut self, enabled: bool) -> Self {
        self.trace_messages = enabled;
        self
    }
}
