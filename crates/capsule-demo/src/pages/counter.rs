//! Counter page
//!
//! "+ later" schedules an increment and shows how many are still in flight.
//! After a remount the new instance starts with nothing pending, and the old
//! instance's increments are dropped when they land.

use capsule_core::{Cmd, Html, Program, Sub};
use std::time::Duration;

/// How long "+ later" waits before incrementing.
pub const LATER_DELAY: Duration = Duration::from_millis(1500);

/// Counter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    /// Current value
    pub count: i64,
    /// Delayed increments not yet landed
    pub pending: u32,
}

/// Counter messages.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Add one
    Increment,
    /// Subtract one
    Decrement,
    /// Schedule [`Msg::Landed`] after [`LATER_DELAY`]
    IncrementLater,
    /// A delayed increment arrived
    Landed,
}

/// Counter starting at the flags value.
pub fn program() -> Program<i64, Counter, Msg> {
    Program::element(
        |count| (Counter { count, pending: 0 }, Cmd::none()),
        update,
        view,
        |_| Sub::none(),
    )
}

fn update(msg: Msg, counter: Counter) -> (Counter, Cmd<Msg>) {
    let Counter { count, pending } = counter;
    match msg {
        Msg::Increment => (Counter { count: count + 1, pending }, Cmd::none()),
        Msg::Decrement => (Counter { count: count - 1, pending }, Cmd::none()),
        Msg::IncrementLater => (
            Counter {
                count,
                pending: pending + 1,
            },
            Cmd::after(LATER_DELAY, Msg::Landed),
        ),
        Msg::Landed => (
            Counter {
                count: count + 1,
                pending: pending.saturating_sub(1),
            },
            Cmd::none(),
        ),
    }
}

fn view(counter: &Counter) -> Html<Msg> {
    let mut root = Html::element("div")
        .attr("class", "counter")
        .child(
            Html::element("button")
                .id("dec")
                .on_click(Msg::Decrement)
                .child(Html::text("-")),
        )
        .child(Html::element("output").child(Html::text(counter.count.to_string())))
        .child(
            Html::element("button")
                .id("inc")
                .on_click(Msg::Increment)
                .child(Html::text("+")),
        )
        .child(
            Html::element("button")
                .id("later")
                .on_click(Msg::IncrementLater)
                .child(Html::text("+ later")),
        );
    if counter.pending > 0 {
        root = root.child(
            Html::element("span")
                .id("pending")
                .child(Html::text(format!("{} pending", counter.pending))),
        );
    }
    root.into()
}
