//! Remote loader whose reply arrives through a oneshot channel
//!
//! The flags are the receiving half; tests keep the sender and decide when,
//! or whether, the "network" answers.

use capsule_core::{Cmd, Html, Program, Sub};
use futures::channel::oneshot;

/// Loader state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Load {
    /// Waiting for the reply
    Loading,
    /// Reply received
    Loaded(String),
    /// Sender dropped without replying
    Failed,
}

/// Loader messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderMsg {
    /// The request finished
    Fetched(Option<String>),
}

/// A sender/receiver pair for one request.
pub fn request() -> (oneshot::Sender<String>, oneshot::Receiver<String>) {
    oneshot::channel()
}

/// Loader that awaits its flags on init.
pub fn program() -> Program<oneshot::Receiver<String>, Load, LoaderMsg> {
    Program::element(
        |reply: oneshot::Receiver<String>| {
            let fetch = Cmd::perform(async move { LoaderMsg::Fetched(reply.await.ok()) });
            (Load::Loading, fetch)
        },
        |LoaderMsg::Fetched(reply), _| {
            let load = match reply {
                Some(body) => Load::Loaded(body),
                None => Load::Failed,
            };
            (load, Cmd::none())
        },
        |load| {
            let text = match load {
                Load::Loading => "loading".to_string(),
                Load::Loaded(body) => body.clone(),
                Load::Failed => "failed".to_string(),
            };
            Html::element("p").id("body").child(Html::text(text)).into()
        },
        |_| Sub::none(),
    )
}
