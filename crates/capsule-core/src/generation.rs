//! Generation tokens
//!
//! A [`Generation`] is minted once per initialisation episode of a child
//! program. Every handle and every pending message derived from that episode
//! carries the same token, so a message produced by an earlier episode can be
//! recognised and discarded.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier for one initialisation episode of a child program.
///
/// Tokens are compared by equality only. Ordering is intentionally not
/// implemented: a message from a *newer* episode arriving at an older handle
/// must be rejected just like a message from an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Generation(Uuid);

impl Generation {
    /// Mint a fresh, process-unique generation.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generation-{}", self.0)
    }
}

impl From<Uuid> for Generation {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Generation> for Uuid {
    fn from(generation: Generation) -> Self {
        generation.0
    }
}
