//! Standard assertion helpers for tests
//!
//! The macros are duck-typed over anything with `ptr_eq` and a command with
//! `is_none`, so they work for pages and emitters alike without this crate
//! depending on `capsule`.

use capsule_core::{Action, Cmd, Html};
use std::time::Duration;

/// Assert that a delivery was absorbed: same handle back, no command.
#[macro_export]
macro_rules! assert_absorbed {
    ($before:expr, $after:expr, $cmd:expr) => {{
        assert!(
            $after.ptr_eq(&$before),
            "expected the handle back unchanged, got {:?} (was {:?})",
            $after,
            $before
        );
        assert!($cmd.is_none(), "expected no command, got {:?}", $cmd);
    }};
}

/// Assert the text content of a view.
#[macro_export]
macro_rules! assert_text {
    ($html:expr, $expected:expr) => {
        assert_eq!(
            $html.text_content(),
            $expected,
            "unexpected text in view {:?}",
            $html
        )
    };
}

/// Fire the `click` listener of element `id`, panicking when it is missing.
pub fn click<Msg: 'static>(html: &Html<Msg>, id: &str) -> Msg {
    html.trigger(id, "click", "")
        .unwrap_or_else(|| panic!("no click listener on #{id} in {html:?}"))
}

/// Fire the `input` listener of element `id` with `value`.
pub fn input<Msg: 'static>(html: &Html<Msg>, id: &str, value: &str) -> Msg {
    html.trigger(id, "input", value)
        .unwrap_or_else(|| panic!("no input listener on #{id} in {html:?}"))
}

/// Messages of every `Deliver` action, in order.
pub fn delivered<Msg: 'static>(cmd: Cmd<Msg>) -> Vec<Msg> {
    cmd.into_actions()
        .into_iter()
        .filter_map(|action| match action {
            Action::Deliver(msg) => Some(msg),
            _ => None,
        })
        .collect()
}

/// Delay and message of every timer action, in order.
pub fn timers<Msg: 'static>(cmd: Cmd<Msg>) -> Vec<(Duration, Msg)> {
    cmd.into_actions()
        .into_iter()
        .filter_map(|action| match action {
            Action::After { delay, msg } => Some((delay, msg)),
            _ => None,
        })
        .collect()
}

/// The single timer message of `cmd`.
pub fn only_timer<Msg: 'static>(cmd: Cmd<Msg>) -> Msg {
    let mut timers = timers(cmd);
    assert_eq!(timers.len(), 1, "expected exactly one timer");
    timers.remove(0).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter;

    #[test]
    fn click_and_timer_helpers() {
        let program = counter::program();
        let view = program.view(&0);
        let msg = click(&view, counter::LATER);
        assert_eq!(msg, counter::Msg::IncrementLater);

        let (_, cmd) = program.update(msg, 0);
        assert_eq!(only_timer(cmd), counter::Msg::Increment);
        assert_text!(view, "0");
    }

    #[test]
    #[should_panic(expected = "no click listener")]
    fn click_on_missing_id_panics() {
        click(&counter::program().view(&0), "nope");
    }

    #[test]
    fn delivered_skips_timers() {
        let cmd = Cmd::batch([
            Cmd::deliver(1),
            Cmd::after(Duration::from_millis(1), 2),
            Cmd::deliver(3),
        ]);
        assert_eq!(delivered(cmd), vec![1, 3]);
    }
}
