//! Commands
//!
//! A [`Cmd`] describes side effects a program wants the host to perform on
//! its behalf. Each finished effect comes back to the program as a message.
//! Commands are plain values: building one performs nothing until the host
//! loop executes it.

use futures::future::{FutureExt, LocalBoxFuture};
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// Shared message conversion used while mapping commands.
type Retarget<A, B> = Rc<dyn Fn(A) -> B>;

/// A single side effect.
pub enum Action<Msg> {
    /// Deliver `Msg` on the next host tick.
    Deliver(Msg),
    /// Deliver `msg` once the host clock has advanced by `delay`.
    After {
        /// Delay relative to the moment the command is executed
        delay: Duration,
        /// Message delivered when the timer fires
        msg: Msg,
    },
    /// Run an asynchronous task and deliver its output.
    Perform(LocalBoxFuture<'static, Msg>),
}

impl<Msg: 'static> Action<Msg> {
    fn retarget<B: 'static>(self, f: &Retarget<Msg, B>) -> Action<B> {
        match self {
            Action::Deliver(msg) => Action::Deliver(f(msg)),
            Action::After { delay, msg } => Action::After { delay, msg: f(msg) },
            Action::Perform(task) => {
                let f = Rc::clone(f);
                Action::Perform(task.map(move |msg| f(msg)).boxed_local())
            }
        }
    }
}

impl<Msg> fmt::Debug for Action<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Deliver(_) => f.write_str("Deliver(..)"),
            Action::After { delay, .. } => f.debug_struct("After").field("delay", delay).finish(),
            Action::Perform(_) => f.write_str("Perform(..)"),
        }
    }
}

/// A batch of side effects producing messages of type `Msg`.
#[must_use = "commands do nothing unless handed to the host loop"]
pub struct Cmd<Msg> {
    actions: Vec<Action<Msg>>,
}

impl<Msg: 'static> Cmd<Msg> {
    /// The command that does nothing.
    pub fn none() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Deliver `msg` back to the program on the next host tick.
    ///
    /// The message is queued rather than handed to `update` directly, so a
    /// program never re-enters its own update function.
    pub fn deliver(msg: Msg) -> Self {
        Self {
            actions: vec![Action::Deliver(msg)],
        }
    }

    /// Deliver `msg` after `delay` of host time.
    pub fn after(delay: Duration, msg: Msg) -> Self {
        Self {
            actions: vec![Action::After { delay, msg }],
        }
    }

    /// Run `task` on the host executor and deliver its output.
    pub fn perform<F>(task: F) -> Self
    where
        F: Future<Output = Msg> + 'static,
    {
        Self {
            actions: vec![Action::Perform(task.boxed_local())],
        }
    }

    /// Combine several commands into one, preserving order.
    pub fn batch(cmds: impl IntoIterator<Item = Cmd<Msg>>) -> Self {
        Self {
            actions: cmds.into_iter().flat_map(|cmd| cmd.actions).collect(),
        }
    }

    /// Append the actions of `other` after those of `self`.
    pub fn and(mut self, other: Cmd<Msg>) -> Self {
        self.actions.extend(other.actions);
        self
    }

    /// Convert every message this command will produce.
    pub fn map<B: 'static>(self, f: impl Fn(Msg) -> B + 'static) -> Cmd<B> {
        let f: Retarget<Msg, B> = Rc::new(f);
        Cmd {
            actions: self
                .actions
                .into_iter()
                .map(|action| action.retarget(&f))
                .collect(),
        }
    }

    /// Whether this command performs nothing.
    pub fn is_none(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of individual actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Borrow the individual actions.
    pub fn actions(&self) -> &[Action<Msg>] {
        &self.actions
    }

    /// Take the individual actions, for execution by a host loop.
    pub fn into_actions(self) -> Vec<Action<Msg>> {
        self.actions
    }
}

impl<Msg: 'static> Default for Cmd<Msg> {
    fn default() -> Self {
        Self::none()
    }
}

impl<Msg> fmt::Debug for Cmd<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.actions.iter()).finish()
    }
}
