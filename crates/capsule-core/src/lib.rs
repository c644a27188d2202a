//! Capsule Core - host capability contracts
//!
//! This crate provides the small set of host-side types that the Capsule
//! composition layer is written against, together with a deterministic
//! single-threaded host loop for running and testing programs.
//!
//! # Capability Contracts
//!
//! | Type | Contract |
//! |------|----------|
//! | [`Html`] | View artifact; `map` re-targets listeners to another message type |
//! | [`Cmd`] | Effect descriptor; `none`, `batch`, `map`, next-tick `deliver` |
//! | [`Sub`] | Subscription descriptor; `none`, `batch`, `map` |
//! | [`Generation`] | Globally unique token compared by equality |
//! | [`Program`] | The `init` / `update` / `view` / `subscriptions` record |
//!
//! # Host Loop
//!
//! [`Runtime`] owns a program's model and executes its commands. It never
//! spawns threads: tasks run on a local executor and time is simulated, so a
//! scenario replays identically every run.
//!
//! ```
//! use capsule_core::{Cmd, Html, Program, Runtime, RuntimeConfig, Sub};
//!
//! #[derive(Clone)]
//! enum Msg {
//!     Increment,
//! }
//!
//! let program = Program::element(
//!     |start: i32| (start, Cmd::none()),
//!     |Msg::Increment, count| (count + 1, Cmd::none()),
//!     |count| {
//!         Html::element("button")
//!             .id("inc")
//!             .on_click(Msg::Increment)
//!             .child(Html::text(count.to_string()))
//!             .into()
//!     },
//!     |_| Sub::none(),
//! );
//!
//! let mut runtime = Runtime::start(program, 41, RuntimeConfig::default());
//! runtime.click("inc").unwrap();
//! assert_eq!(runtime.view().text_content(), "42");
//! ```

#![forbid(unsafe_code)]

pub mod cmd;
pub mod config;
pub mod errors;
pub mod generation;
pub mod html;
pub mod program;
pub mod runtime;
pub mod sub;

pub use cmd::{Action, Cmd};
pub use config::{RuntimeConfig, DEFAULT_MAX_STEPS_PER_DRAIN};
pub use errors::{ConfigError, RuntimeError};
pub use generation::Generation;
pub use html::{Element, Html, Listener};
pub use program::Program;
pub use runtime::Runtime;
pub use sub::{Sub, SubEvent, SubSource, Subscription};
