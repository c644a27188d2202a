//! Scripted sessions
//!
//! A script is a list of steps separated by whitespace or commas:
//!
//! | Step | Effect |
//! |------|--------|
//! | `nav:<route>` | navigate to `counter`, `signup` or `clock` |
//! | `click:<id>` | click element `id` |
//! | `input:<id>=<value>` | type `value` into element `id` |
//! | `wait:<ms>` | advance the host clock |

use crate::error::ScriptError;
use crate::shell::{self, Route, Shell, ShellMsg};
use capsule_core::{Html, Runtime, RuntimeConfig};
use std::fmt;
use std::time::Duration;

/// Script run when none is given on the command line.
pub const DEFAULT_SCRIPT: &str = "click:inc click:later wait:1000 nav:signup \
     input:name=Al input:age=30 click:submit nav:counter wait:1000 nav:clock wait:2000";

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Navigate to a route
    Nav(Route),
    /// Click an element
    Click(String),
    /// Type into an element
    Input {
        /// Element id
        id: String,
        /// New value
        value: String,
    },
    /// Advance the host clock
    Wait(Duration),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Nav(route) => write!(f, "nav:{route}"),
            Step::Click(id) => write!(f, "click:{id}"),
            Step::Input { id, value } => write!(f, "input:{id}={value}"),
            Step::Wait(delay) => write!(f, "wait:{}", delay.as_millis()),
        }
    }
}

impl Step {
    /// Parse a single step.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let (kind, arg) = text
            .split_once(':')
            .ok_or_else(|| ScriptError::malformed(text))?;
        match kind {
            "nav" => arg
                .parse()
                .map(Step::Nav)
                .map_err(ScriptError::unknown_route),
            "click" if !arg.is_empty() => Ok(Step::Click(arg.to_string())),
            "input" => {
                let (id, value) = arg
                    .split_once('=')
                    .ok_or_else(|| ScriptError::malformed(text))?;
                Ok(Step::Input {
                    id: id.to_string(),
                    value: value.to_string(),
                })
            }
            "wait" => arg
                .parse()
                .map(|ms| Step::Wait(Duration::from_millis(ms)))
                .map_err(|_| ScriptError::invalid_wait(arg)),
            "click" => Err(ScriptError::malformed(text)),
            other => Err(ScriptError::unknown_step(other)),
        }
    }
}

/// Parse a whole script.
pub fn parse(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|step| !step.is_empty())
        .map(Step::parse)
        .collect()
}

/// A running shell driven step by step.
pub struct Session {
    runtime: Runtime<(), Shell, ShellMsg>,
}

impl Session {
    /// Start the shell with `config`.
    pub fn start(config: RuntimeConfig) -> Result<Self, ScriptError> {
        let mut runtime = Runtime::start(shell::program(), (), config);
        runtime
            .run_until_idle()
            .map_err(|e| ScriptError::runtime("start", e))?;
        Ok(Self { runtime })
    }

    /// Execute one step, returning the number of messages it processed.
    pub fn apply(&mut self, step: &Step) -> Result<usize, ScriptError> {
        let result = match step {
            Step::Nav(route) => self.runtime.send(ShellMsg::Navigate(*route)),
            Step::Click(id) => self.runtime.click(id),
            Step::Input { id, value } => self.runtime.input(id, value),
            Step::Wait(delay) => self.runtime.advance(*delay),
        };
        let processed = result.map_err(|e| ScriptError::runtime(step, e))?;
        tracing::debug!(%step, processed, now = ?self.runtime.now(), "step applied");
        Ok(processed)
    }

    /// The shell's current state.
    pub fn shell(&self) -> &Shell {
        self.runtime.model()
    }

    /// The shell's current view.
    pub fn view(&self) -> Html<ShellMsg> {
        self.runtime.view()
    }

    /// Current view as markup.
    pub fn render(&self) -> String {
        self.view().render()
    }
}
