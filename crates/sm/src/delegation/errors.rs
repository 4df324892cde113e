//! Errors related to the state transitions in the Delegation State Machine.

use stzone_primitives::records::DelegationRecord;

use crate::{delegation::events::DelegationEvent, errors::RecordSMError};

/// Errors that can occur in the Delegation State Machine.
pub type DelegationSMError = RecordSMError<DelegationRecord, DelegationEvent>;

/// The result type for operations in the Delegation State Machine.
pub type DelegationSMResult<T> = Result<T, DelegationSMError>;
