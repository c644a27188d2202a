//! Counter with an immediate and a delayed increment

use capsule_core::{Cmd, Html, Program, Sub};
use std::time::Duration;

/// Id of the increment button.
pub const INC: &str = "inc";
/// Id of the decrement button.
pub const DEC: &str = "dec";
/// Id of the delayed increment button.
pub const LATER: &str = "later";
/// Delay used by [`Msg::IncrementLater`].
pub const LATER_DELAY: Duration = Duration::from_millis(1000);

/// Counter messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Add one
    Increment,
    /// Subtract one
    Decrement,
    /// Add one after [`LATER_DELAY`]
    IncrementLater,
}

/// Counter starting at the value passed as flags.
pub fn program() -> Program<i64, i64, Msg> {
    Program::element(|start| (start, Cmd::none()), update, view, |_| Sub::none())
}

/// Counter without effects, starting at zero.
pub fn sandbox() -> Program<(), i64, Msg> {
    Program::sandbox(0, |msg, count| update(msg, count).0, view)
}

fn update(msg: Msg, count: i64) -> (i64, Cmd<Msg>) {
    match msg {
        Msg::Increment => (count + 1, Cmd::none()),
        Msg::Decrement => (count - 1, Cmd::none()),
        Msg::IncrementLater => (count, Cmd::after(LATER_DELAY, Msg::Increment)),
    }
}

/// Buttons carry no text, so the view's text content is exactly the count.
fn view(count: &i64) -> Html<Msg> {
    Html::element("div")
        .attr("class", "counter")
        .child(Html::element("button").id(DEC).on_click(Msg::Decrement))
        .child(Html::element("span").id("count").child(Html::text(count.to_string())))
        .child(Html::element("button").id(INC).on_click(Msg::Increment))
        .child(Html::element("button").id(LATER).on_click(Msg::IncrementLater))
        .into()
}
