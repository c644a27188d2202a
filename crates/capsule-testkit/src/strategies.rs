//! Property test strategies
//!
//! Operation scripts for driving a counter held in a parent slot, used to
//! compare a wrapped child against the bare program.

use crate::signup::User;
use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

/// One step a parent performs on a counter slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOp {
    /// Click increment on the current child
    Increment,
    /// Click decrement on the current child
    Decrement,
    /// Re-initialise the slot from the given start value
    Reinit(i64),
    /// Deliver a message captured from an earlier generation
    Stale,
}

/// Strategy for a single slot operation.
pub fn arb_slot_op() -> impl Strategy<Value = SlotOp> {
    prop_oneof![
        4 => Just(SlotOp::Increment),
        3 => Just(SlotOp::Decrement),
        1 => (-50i64..50).prop_map(SlotOp::Reinit),
        2 => Just(SlotOp::Stale),
    ]
}

/// Strategy for a script of up to `max_len` operations.
pub fn arb_slot_script(max_len: usize) -> impl Strategy<Value = Vec<SlotOp>> {
    proptest::collection::vec(arb_slot_op(), 0..=max_len)
}

/// Strategy for plausible users.
pub fn arb_user() -> impl Strategy<Value = User> {
    ("[A-Z][a-z]{0,8}", 0u32..120).prop_map(|(name, age)| User { name, age })
}
