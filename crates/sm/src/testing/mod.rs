//! Testing utilities shared by the record state machines.

pub(crate) mod proptest;
pub(crate) mod transition;
