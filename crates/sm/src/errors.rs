//! Errors related to the state transitions in the record state machines.

use thiserror::Error;

/// Errors that can occur in a record state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordSMError<S, E>
where
    S: std::fmt::Display + std::fmt::Debug,
    E: std::fmt::Display + std::fmt::Debug,
{
    /// An invalid event was received for the current state.
    #[error("Received invalid event {event} in state {state}; reason: {reason:?}")]
    InvalidEvent {
        /// The state in which the event was received.
        state: Box<S>,
        /// The invalid event that was received.
        event: Box<E>,
        /// The reason for the invalidity.
        reason: Option<String>, // sometimes the reason is obvious from context
    },

    /// A duplicate event was received in the current state.
    #[error("Received a duplicate event {event} in state {state}")]
    Duplicate {
        /// The state in which the duplicate event was received.
        state: Box<S>,
        /// The duplicate event that was received.
        event: Box<E>,
    },

    /// An event was rejected in the current state.
    ///
    /// This happens when the event is expected in this state but its payload or the record fails
    /// a precondition.
    #[error("Event {event} rejected in state: {state}, reason: {reason}")]
    Rejected {
        /// The state in which the event was rejected.
        state: Box<S>,
        /// The reason for the rejection.
        reason: String,
        /// The rejected event.
        event: Box<E>,
    },
}

impl<S, E> RecordSMError<S, E>
where
    S: std::fmt::Display + std::fmt::Debug,
    E: std::fmt::Display + std::fmt::Debug,
{
    pub(crate) fn invalid_event(state: S, event: E, reason: Option<String>) -> Self {
        RecordSMError::InvalidEvent {
            state: Box::new(state),
            event: Box::new(event),
            reason,
        }
    }

    pub(crate) fn duplicate(state: S, event: E) -> Self {
        RecordSMError::Duplicate {
            state: Box::new(state),
            event: Box::new(event),
        }
    }

    pub(crate) fn rejected(state: S, event: E, reason: impl Into<String>) -> Self {
        RecordSMError::Rejected {
            state: Box::new(state),
            reason: reason.into(),
            event: Box::new(event),
        }
    }

    /// Returns `true` if the error is a [`RecordSMError::Duplicate`].
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, RecordSMError::Duplicate { .. })
    }

    /// Returns `true` if the error is a [`RecordSMError::Rejected`].
    pub const fn is_rejected(&self) -> bool {
        matches!(self, RecordSMError::Rejected { .. })
    }

    /// Returns `true` if the error is a [`RecordSMError::InvalidEvent`].
    pub const fn is_invalid_event(&self) -> bool {
        matches!(self, RecordSMError::InvalidEvent { .. })
    }
}
