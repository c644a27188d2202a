//! Capsule Demo - a scripted single-page application
//!
//! A shell with three routes built from independently written child
//! programs. The counter and clock are [`capsule::Page`]s held in one map;
//! the signup form is a [`capsule::Emitter`] that reports registered users
//! back to the shell. The binary drives the shell through a
//! [`script::Session`] and prints the rendered markup after every step.

#![forbid(unsafe_code)]

pub mod error;
pub mod pages;
pub mod script;
pub mod shell;

pub use error::ScriptError;
pub use script::{Session, Step, DEFAULT_SCRIPT};
pub use shell::{Route, Shell, ShellMsg};
