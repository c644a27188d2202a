//! Fixture child programs
//!
//! Each module exposes a `program()` constructor and the element ids its view
//! uses, so tests can drive it through `Html::trigger` or `Runtime::click`.

pub mod clock;
pub mod counter;
pub mod loader;
pub mod signup;
