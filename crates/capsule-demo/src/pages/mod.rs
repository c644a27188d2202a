//! Child programs mounted by the shell

pub mod clock;
pub mod counter;
pub mod signup;
