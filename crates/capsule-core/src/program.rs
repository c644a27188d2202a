//! Program capability records
//!
//! A [`Program`] bundles the four operations of an Elm-architecture program:
//! `init`, `update`, `view` and `subscriptions`. The record is cheap to clone
//! and is consumed both by the host loop ([`crate::Runtime`]) and by the
//! type-erasing wrappers built on top of this crate.

use crate::{Cmd, Html, Sub};
use std::fmt;
use std::rc::Rc;

type InitFn<F, M, Msg> = Rc<dyn Fn(F) -> (M, Cmd<Msg>)>;
type UpdateFn<M, Msg> = Rc<dyn Fn(Msg, M) -> (M, Cmd<Msg>)>;
type ViewFn<M, Msg> = Rc<dyn Fn(&M) -> Html<Msg>>;
type SubscriptionsFn<M, Msg> = Rc<dyn Fn(&M) -> Sub<Msg>>;

/// Capability record of a program with flags `F`, model `M` and messages `Msg`.
pub struct Program<F, M, Msg> {
    init: InitFn<F, M, Msg>,
    update: UpdateFn<M, Msg>,
    view: ViewFn<M, Msg>,
    subscriptions: SubscriptionsFn<M, Msg>,
}

impl<F, M, Msg> Clone for Program<F, M, Msg> {
    fn clone(&self) -> Self {
        Self {
            init: Rc::clone(&self.init),
            update: Rc::clone(&self.update),
            view: Rc::clone(&self.view),
            subscriptions: Rc::clone(&self.subscriptions),
        }
    }
}

impl<F: 'static, M: 'static, Msg: 'static> Program<F, M, Msg> {
    /// A program with effects and subscriptions.
    pub fn element(
        init: impl Fn(F) -> (M, Cmd<Msg>) + 'static,
        update: impl Fn(Msg, M) -> (M, Cmd<Msg>) + 'static,
        view: impl Fn(&M) -> Html<Msg> + 'static,
        subscriptions: impl Fn(&M) -> Sub<Msg> + 'static,
    ) -> Self {
        Self {
            init: Rc::new(init),
            update: Rc::new(update),
            view: Rc::new(view),
            subscriptions: Rc::new(subscriptions),
        }
    }

    /// Run `init` with the given flags.
    pub fn init(&self, flags: F) -> (M, Cmd<Msg>) {
        (self.init)(flags)
    }

    /// Run `update` for one message.
    pub fn update(&self, msg: Msg, model: M) -> (M, Cmd<Msg>) {
        (self.update)(msg, model)
    }

    /// Render the model.
    pub fn view(&self, model: &M) -> Html<Msg> {
        (self.view)(model)
    }

    /// Compute the model's current subscriptions.
    pub fn subscriptions(&self, model: &M) -> Sub<Msg> {
        (self.subscriptions)(model)
    }
}

impl<M: Clone + 'static, Msg: 'static> Program<(), M, Msg> {
    /// A pure program: no commands, no subscriptions, no flags.
    pub fn sandbox(
        model: M,
        update: impl Fn(Msg, M) -> M + 'static,
        view: impl Fn(&M) -> Html<Msg> + 'static,
    ) -> Self {
        Self::element(
            move |()| (model.clone(), Cmd::none()),
            move |msg, model| (update(msg, model), Cmd::none()),
            view,
            |_| Sub::none(),
        )
    }
}

impl<F, M, Msg> fmt::Debug for Program<F, M, Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("model", &std::any::type_name::<M>())
            .field("msg", &std::any::type_name::<Msg>())
            .finish()
    }
}
