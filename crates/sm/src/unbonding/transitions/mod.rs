//! The state transition functions of the Unbonding State Machine.

mod accumulate;
mod claim;
mod undelegate;
