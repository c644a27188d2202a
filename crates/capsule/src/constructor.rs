//! Suspended initialisers

use capsule_core::Cmd;
use std::fmt;
use std::rc::Rc;

type InitFn<F, H, M> = Rc<dyn Fn(F) -> (H, Cmd<M>)>;

/// A child program waiting for its flags.
///
/// Every call to [`Constructor::init`] starts a new initialisation episode:
/// the returned handle gets a fresh generation, so messages belonging to any
/// earlier episode of the same constructor are rejected by it.
pub struct Constructor<F, H, M> {
    init: InitFn<F, H, M>,
}

impl<F, H, M> Clone for Constructor<F, H, M> {
    fn clone(&self) -> Self {
        Self {
            init: Rc::clone(&self.init),
        }
    }
}

impl<F, H, M> Constructor<F, H, M> {
    pub(crate) fn new(init: impl Fn(F) -> (H, Cmd<M>) + 'static) -> Self {
        Self {
            init: Rc::new(init),
        }
    }

    /// Initialise with `flags`, returning the opaque handle and its first
    /// command.
    pub fn init(&self, flags: F) -> (H, Cmd<M>) {
        (self.init)(flags)
    }
}

impl<F, H, M> fmt::Debug for Constructor<F, H, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("flags", &std::any::type_name::<F>())
            .field("handle", &std::any::type_name::<H>())
            .finish()
    }
}
