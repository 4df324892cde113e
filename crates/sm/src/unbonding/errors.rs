//! Errors related to the state transitions in the Unbonding State Machine.

use stzone_primitives::records::UnbondingRecord;

use crate::{errors::RecordSMError, unbonding::events::UnbondingEvent};

/// Errors that can occur in the Unbonding State Machine.
pub type UnbondingSMError = RecordSMError<UnbondingRecord, UnbondingEvent>;

/// The result type for operations in the Unbonding State Machine.
pub type UnbondingSMResult<T> = Result<T, UnbondingSMError>;
