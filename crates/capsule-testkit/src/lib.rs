//! Capsule Testing Infrastructure
//!
//! Small child programs with well-known behaviour, plus helpers for poking
//! at their views. The fixtures depend only on `capsule-core`, so they can be
//! wrapped as pages or emitters by any crate's tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! capsule-testkit = { workspace = true }
//! ```
//!
//! ```rust
//! use capsule_core::{Runtime, RuntimeConfig};
//! use capsule_testkit::fixtures::counter;
//!
//! let mut runtime = Runtime::start(counter::program(), 0, RuntimeConfig::default());
//! runtime.click(counter::INC).unwrap();
//! assert_eq!(*runtime.model(), 1);
//! ```

pub mod assertions;
pub mod fixtures;
pub mod strategies;

pub use assertions::*;
pub use fixtures::{clock, counter, loader, signup};
