//! Emitters
//!
//! An [`Emitter`] is a [`crate::Page`] with a side-channel to its parent.
//! A caller-supplied router inspects every raw child message; when it
//! recognises one, the routed value is converted to the parent's message
//! type `P` and handed back to the parent for one-shot delivery.
//!
//! # Emission rules
//!
//! - The router sees the raw child message of the step being processed.
//! - A routed step drops the child's own command for that step. Children
//!   commonly answer a "submit" message by re-issuing it; forwarding that
//!   command would emit again on every tick.
//! - Emissions survive staleness: a message addressed to an earlier
//!   generation leaves the emitter untouched but its emission still reaches
//!   the parent.
//! - A router that matches every message suppresses every child command.
//!   That is a wiring mistake and is not detected.

use crate::constructor::Constructor;
use crate::lineage::{Envelope, Lineage, Router, Wiring};
use capsule_core::{Cmd, Generation, Html, Program, Sub};
use std::fmt;
use std::rc::Rc;

/// Constructor producing [`Emitter`]s that emit parent messages `P`.
pub type EmitterInit<F, P> = Constructor<F, Emitter<P>, EmitterMsg<P>>;

/// Opaque handle to a child program that can emit parent messages `P`.
pub struct Emitter<P> {
    lineage: Rc<Lineage<P>>,
}

impl<P> Clone for Emitter<P> {
    fn clone(&self) -> Self {
        Self {
            lineage: Rc::clone(&self.lineage),
        }
    }
}

/// Opaque message addressed to an [`Emitter`].
pub struct EmitterMsg<P> {
    envelope: Envelope<P>,
}

impl<P> Clone for EmitterMsg<P> {
    fn clone(&self) -> Self {
        Self {
            envelope: self.envelope.clone(),
        }
    }
}

impl<P> EmitterMsg<P> {
    fn wrap(envelope: Envelope<P>) -> Self {
        Self { envelope }
    }

    /// Generation of the emitter that produced this message.
    pub fn generation(&self) -> Generation {
        self.envelope.generation()
    }
}

impl<P> fmt::Debug for EmitterMsg<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitterMsg")
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

/// Outcome of delivering one message to an [`Emitter`].
#[must_use]
pub struct EmitterStep<P> {
    /// The emitter to keep
    pub emitter: Emitter<P>,
    /// Child command, already dropped when the step emitted
    pub cmd: Cmd<EmitterMsg<P>>,
    /// Parent message routed from the child message, if any
    pub emitted: Option<P>,
}

impl<P: 'static> Emitter<P> {
    /// Wrap a program with effects and subscriptions.
    ///
    /// `router` classifies raw child messages; `to_parent` converts a routed
    /// value into the parent's message type.
    pub fn element<F, M, Msg, V>(
        program: Program<F, M, Msg>,
        router: impl Fn(&Msg) -> Option<V> + 'static,
        to_parent: impl Fn(V) -> P + 'static,
    ) -> EmitterInit<F, P>
    where
        F: 'static,
        M: Clone + 'static,
        Msg: Clone + 'static,
    {
        let router: Router<Msg, P> = Rc::new(move |msg: &Msg| router(msg).map(&to_parent));
        let wiring = Wiring::new(program, router);
        Constructor::new(move |flags| {
            let (lineage, cmd) = wiring.init(flags);
            (Emitter { lineage }, cmd.map(EmitterMsg::wrap))
        })
    }

    /// Wrap a pure program: no commands, no subscriptions, no flags.
    pub fn sandbox<M, Msg, V>(
        model: M,
        update: impl Fn(Msg, M) -> M + 'static,
        view: impl Fn(&M) -> Html<Msg> + 'static,
        router: impl Fn(&Msg) -> Option<V> + 'static,
        to_parent: impl Fn(V) -> P + 'static,
    ) -> EmitterInit<(), P>
    where
        M: Clone + 'static,
        Msg: Clone + 'static,
    {
        Self::element(Program::sandbox(model, update, view), router, to_parent)
    }

    /// Placeholder emitter: blank view, no subscriptions, accepts no message.
    pub fn empty() -> Self {
        Self {
            lineage: Lineage::empty(),
        }
    }

    /// Deliver a message and report what it produced.
    ///
    /// Use this when the parent wants to handle the emission itself; use
    /// [`Emitter::update`] to have it delivered as a message instead.
    pub fn step(&self, msg: EmitterMsg<P>) -> EmitterStep<P> {
        let transition = self.lineage.step(&msg.envelope);
        EmitterStep {
            emitter: Emitter {
                lineage: transition.lineage,
            },
            cmd: transition.cmd.map(EmitterMsg::wrap),
            emitted: transition.emitted,
        }
    }

    /// Deliver a message, re-targeting the child command with `wrap`.
    ///
    /// An emission is scheduled with [`Cmd::deliver`], so it reaches the
    /// parent's update on the next tick rather than from inside this call.
    pub fn update(
        &self,
        msg: EmitterMsg<P>,
        wrap: impl Fn(EmitterMsg<P>) -> P + 'static,
    ) -> (Emitter<P>, Cmd<P>) {
        let EmitterStep {
            emitter,
            cmd,
            emitted,
        } = self.step(msg);
        let cmd = cmd.map(wrap);
        let cmd = match emitted {
            Some(parent_msg) => cmd.and(Cmd::deliver(parent_msg)),
            None => cmd,
        };
        (emitter, cmd)
    }

    /// Render, re-targeting messages with `wrap`.
    pub fn view<Q: 'static>(&self, wrap: impl Fn(EmitterMsg<P>) -> Q + 'static) -> Html<Q> {
        self.lineage
            .view()
            .map(move |envelope| wrap(EmitterMsg::wrap(envelope)))
    }

    /// Current subscriptions, re-targeting messages with `wrap`.
    pub fn subscriptions<Q: 'static>(
        &self,
        wrap: impl Fn(EmitterMsg<P>) -> Q + 'static,
    ) -> Sub<Q> {
        self.lineage
            .subscriptions()
            .map(move |envelope| wrap(EmitterMsg::wrap(envelope)))
    }

    /// Generation of the initialisation episode this emitter belongs to.
    pub fn generation(&self) -> Generation {
        self.lineage.generation()
    }

    /// Whether `msg` would update the child rather than be discarded.
    pub fn accepts(&self, msg: &EmitterMsg<P>) -> bool {
        msg.generation() == self.generation()
    }

    /// Whether both handles are the same value.
    pub fn ptr_eq(&self, other: &Emitter<P>) -> bool {
        Rc::ptr_eq(&self.lineage, &other.lineage)
    }
}

impl<P: 'static> Default for Emitter<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: 'static> fmt::Debug for Emitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("generation", &self.lineage.generation())
            .finish_non_exhaustive()
    }
}
