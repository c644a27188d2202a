//! Shared erasure and staleness machinery
//!
//! A [`Lineage`] is the type-erased state behind both [`crate::Page`] and
//! [`crate::Emitter`]: the child's model hidden behind `dyn Any`, its view
//! and subscriptions already re-targeted to [`Envelope`], and the generation
//! of the initialisation episode it belongs to.
//!
//! An [`Envelope`] is a pending update. It carries the generation it was
//! minted under and a [`Pending`] trait object holding the raw child message
//! together with the child's wiring. The concrete model and message types
//! only exist inside [`PendingUpdate`]; nothing outside this module can name
//! them.

use capsule_core::{Cmd, Generation, Html, Program, Sub};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Classifies a raw child message as an emission for the parent.
pub(crate) type Router<Msg, E> = Rc<dyn Fn(&Msg) -> Option<E>>;

/// A child program plus the router deciding which of its messages surface.
pub(crate) struct Wiring<F, M, Msg, E> {
    program: Program<F, M, Msg>,
    router: Router<Msg, E>,
}

impl<F, M, Msg, E> Wiring<F, M, Msg, E>
where
    F: 'static,
    M: Clone + 'static,
    Msg: Clone + 'static,
    E: 'static,
{
    pub(crate) fn new(program: Program<F, M, Msg>, router: Router<Msg, E>) -> Rc<Self> {
        Rc::new(Self { program, router })
    }

    /// Start a new initialisation episode.
    pub(crate) fn init(self: &Rc<Self>, flags: F) -> (Rc<Lineage<E>>, Cmd<Envelope<E>>) {
        let generation = Generation::mint();
        tracing::trace!(
            %generation,
            model = std::any::type_name::<M>(),
            "minted generation"
        );
        let (model, cmd) = self.program.init(flags);
        let cmd = cmd.map(self.tagger(generation));
        (self.settle(generation, model), cmd)
    }

    /// Render `model` and package it as a lineage of `generation`.
    fn settle(self: &Rc<Self>, generation: Generation, model: M) -> Rc<Lineage<E>> {
        let view = self.program.view(&model).map(self.tagger(generation));
        let subscriptions = self
            .program
            .subscriptions(&model)
            .map(self.tagger(generation));
        Rc::new(Lineage {
            generation,
            model: Rc::new(model),
            view,
            subscriptions,
        })
    }

    /// Wrap raw child messages into envelopes of `generation`.
    fn tagger(self: &Rc<Self>, generation: Generation) -> impl Fn(Msg) -> Envelope<E> + 'static {
        let wiring = Rc::clone(self);
        move |msg| Envelope {
            generation,
            pending: Rc::new(PendingUpdate {
                wiring: Rc::clone(&wiring),
                msg,
            }),
        }
    }
}

/// Deferred child update with its concrete types erased.
pub(crate) trait Pending<E> {
    /// Run the router against the raw child message.
    fn emission(&self) -> Option<E>;

    /// Apply the child update to `model`, producing the next lineage.
    ///
    /// Returns `None` when `model` is not of the child's model type.
    fn advance(
        &self,
        generation: Generation,
        model: &dyn Any,
    ) -> Option<(Rc<Lineage<E>>, Cmd<Envelope<E>>)>;
}

struct PendingUpdate<F, M, Msg, E> {
    wiring: Rc<Wiring<F, M, Msg, E>>,
    msg: Msg,
}

impl<F, M, Msg, E> Pending<E> for PendingUpdate<F, M, Msg, E>
where
    F: 'static,
    M: Clone + 'static,
    Msg: Clone + 'static,
    E: 'static,
{
    fn emission(&self) -> Option<E> {
        (self.wiring.router)(&self.msg)
    }

    fn advance(
        &self,
        generation: Generation,
        model: &dyn Any,
    ) -> Option<(Rc<Lineage<E>>, Cmd<Envelope<E>>)> {
        let model = model.downcast_ref::<M>()?.clone();
        let (next, cmd) = self.wiring.program.update(self.msg.clone(), model);
        let cmd = cmd.map(self.wiring.tagger(generation));
        Some((self.wiring.settle(generation, next), cmd))
    }
}

/// Opaque message addressed to one lineage.
pub(crate) struct Envelope<E> {
    generation: Generation,
    pending: Rc<dyn Pending<E>>,
}

impl<E> Clone for Envelope<E> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<E> Envelope<E> {
    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }
}

/// Result of delivering one envelope to a lineage.
pub(crate) struct Transition<E> {
    pub(crate) lineage: Rc<Lineage<E>>,
    pub(crate) cmd: Cmd<Envelope<E>>,
    pub(crate) emitted: Option<E>,
}

/// Type-erased state of one child program instance.
pub(crate) struct Lineage<E> {
    generation: Generation,
    model: Rc<dyn Any>,
    view: Html<Envelope<E>>,
    subscriptions: Sub<Envelope<E>>,
}

impl<E: 'static> Lineage<E> {
    /// Placeholder lineage: blank view, no subscriptions, and a generation
    /// no envelope was ever minted under.
    pub(crate) fn empty() -> Rc<Self> {
        Rc::new(Self {
            generation: Generation::mint(),
            model: Rc::new(()),
            view: Html::empty(),
            subscriptions: Sub::none(),
        })
    }

    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }

    pub(crate) fn view(&self) -> Html<Envelope<E>> {
        self.view.clone()
    }

    pub(crate) fn subscriptions(&self) -> Sub<Envelope<E>> {
        self.subscriptions.clone()
    }

    /// Deliver `envelope`.
    ///
    /// Envelopes from another generation leave this lineage untouched and
    /// yield no command; their emission, if any, still comes through. When
    /// the router matches, the child's own command for the step is dropped.
    pub(crate) fn step(self: &Rc<Self>, envelope: &Envelope<E>) -> Transition<E> {
        let emitted = envelope.pending.emission();
        if envelope.generation != self.generation {
            return self.unchanged(emitted);
        }
        match envelope
            .pending
            .advance(self.generation, self.model.as_ref())
        {
            Some((lineage, cmd)) => Transition {
                lineage,
                cmd: if emitted.is_some() { Cmd::none() } else { cmd },
                emitted,
            },
            None => self.unchanged(emitted),
        }
    }

    fn unchanged(self: &Rc<Self>, emitted: Option<E>) -> Transition<E> {
        Transition {
            lineage: Rc::clone(self),
            cmd: Cmd::none(),
            emitted,
        }
    }
}

impl<E> fmt::Debug for Lineage<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lineage")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
