//! Clock ticking on a periodic subscription

use capsule_core::{Cmd, Html, Program, Sub};
use std::time::Duration;

/// Id of the pause / resume button.
pub const TOGGLE: &str = "toggle";

/// Clock state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    /// Tick interval
    pub interval: Duration,
    /// Ticks received so far
    pub ticks: u32,
    /// Host time of the last tick
    pub last: Duration,
    /// Whether the subscription is active
    pub running: bool,
}

/// Clock messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockMsg {
    /// Periodic tick carrying the host time
    Tick(Duration),
    /// Pause or resume
    Toggle,
}

/// Running clock ticking every `interval` (the flags).
pub fn program() -> Program<Duration, Clock, ClockMsg> {
    Program::element(
        |interval| {
            let clock = Clock {
                interval,
                ticks: 0,
                last: Duration::ZERO,
                running: true,
            };
            (clock, Cmd::none())
        },
        |msg, clock| match msg {
            ClockMsg::Tick(now) => (
                Clock {
                    ticks: clock.ticks + 1,
                    last: now,
                    ..clock
                },
                Cmd::none(),
            ),
            ClockMsg::Toggle => (
                Clock {
                    running: !clock.running,
                    ..clock
                },
                Cmd::none(),
            ),
        },
        |clock| {
            Html::element("div")
                .child(
                    Html::element("span")
                        .id("ticks")
                        .child(Html::text(clock.ticks.to_string())),
                )
                .child(
                    Html::element("button")
                        .id(TOGGLE)
                        .on_click(ClockMsg::Toggle)
                        .child(Html::text(if clock.running { "pause" } else { "resume" })),
                )
                .into()
        },
        |clock| {
            if clock.running {
                Sub::every(clock.interval, ClockMsg::Tick)
            } else {
                Sub::none()
            }
        },
    )
}
