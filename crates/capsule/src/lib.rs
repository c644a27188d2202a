//! Capsule - opaque child programs for Elm-architecture applications
//!
//! A parent application often wants to hold many unrelated child programs
//! (a list of pages, a map of routes) without its own model and message types
//! growing a parameter for every child. This crate erases each child's model
//! and message types behind an opaque handle:
//!
//! | Handle | Message | Extra |
//! |--------|---------|-------|
//! | [`Page`] | [`PageMsg`] | none |
//! | [`Emitter<P>`] | [`EmitterMsg<P>`] | routes selected child messages to the parent as `P` |
//!
//! # Staleness
//!
//! Each [`Constructor::init`] call mints a new [`Generation`]. A handle only
//! applies messages of its own generation; anything else comes back as the
//! unchanged handle with [`Cmd::none`]. This absorbs late timer and task
//! replies addressed to a child that has since been re-initialised in the same
//! slot. Tokens are compared by equality, so out-of-order arrival between
//! sibling instances is rejected as well.
//!
//! # Example
//!
//! ```
//! use capsule::{Page, PageMsg};
//! use capsule_core::{Cmd, Html};
//!
//! #[derive(Clone)]
//! enum Counter {
//!     Increment,
//! }
//!
//! let counter = Page::sandbox(
//!     0,
//!     |Counter::Increment, count: i32| count + 1,
//!     |count| {
//!         Html::element("button")
//!             .id("inc")
//!             .on_click(Counter::Increment)
//!             .child(Html::text(count.to_string()))
//!             .into()
//!     },
//! );
//!
//! // The parent only ever sees `Page` and `PageMsg`.
//! let (mut page, _cmd): (Page, Cmd<PageMsg>) = counter.init(());
//! for _ in 0..3 {
//!     let msg = page.view(|msg| msg).trigger("inc", "click", "").unwrap();
//!     page = page.update(msg).0;
//! }
//! assert_eq!(page.view(|msg| msg).text_content(), "3");
//! ```

#![forbid(unsafe_code)]

mod constructor;
mod emitter;
mod lineage;
mod page;

pub use constructor::Constructor;
pub use emitter::{Emitter, EmitterInit, EmitterMsg, EmitterStep};
pub use page::{Page, PageInit, PageMsg};

// Re-export the host contracts handles are built from
pub use capsule_core::{Cmd, Generation, Html, Program, Sub};
