//! Clock page, ticking once a second while mounted

use capsule_core::{Cmd, Html, Program, Sub};
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

/// Tick carrying the host time.
#[derive(Debug, Clone)]
pub struct Msg(Duration);

/// Clock counting the seconds since it was mounted.
pub fn program() -> Program<(), u64, Msg> {
    Program::element(
        |()| (0, Cmd::none()),
        |Msg(_now), seconds| (seconds + 1, Cmd::none()),
        |seconds| {
            Html::element("p")
                .attr("class", "clock")
                .child(Html::text(format!("{seconds}s on this page")))
                .into()
        },
        |_| Sub::every(TICK, Msg),
    )
}
