//! Generic state machine infrastructure for record lifecycles.
//!
//! This module provides the core abstractions shared by the record state machines, including the
//! generic output type and the trait that all state machines implement.

/// Generic output from any state machine after processing an event.
///
/// `duties` are the actions that need to be executed by the keeper for the transition to take
/// full effect.
///
/// # Type Parameters
///
/// - `D`: The duty type specific to this state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SMOutput<D> {
    /// The duties that need to be performed by the keeper.
    pub duties: Vec<D>,
}

impl<D> Default for SMOutput<D> {
    fn default() -> Self {
        Self { duties: Vec::new() }
    }
}

impl<D> SMOutput<D> {
    /// Creates a new empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an output with the given duties.
    pub const fn with_duties(duties: Vec<D>) -> Self {
        Self { duties }
    }
}

/// Trait for all record state machines.
///
/// This trait provides a uniform interface for processing events and emitting outputs. Each
/// state machine specifies its own config, duty, event and error types through associated types.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for UnbondingSM {
///     type Config = UnbondingSMCfg;
///     type Duty = UnbondingDuty;
///     type Event = UnbondingEvent;
///     type Error = UnbondingSMError;
///
///     fn process_event(&mut self, cfg: &Self::Config, event: Self::Event)
///         -> Result<SMOutput<Self::Duty>, Self::Error>
///     {
///         // Implementation
///     }
/// }
/// ```
pub trait StateMachine {
    /// Static configuration consulted by transitions.
    type Config;

    /// The type of duties this state machine can emit.
    type Duty;

    /// The type of events this state machine can process.
    type Event;

    /// The error type returned when event processing fails.
    type Error;

    /// Processes an event and returns the output or an error.
    ///
    /// An accepted event must either change the state or emit at least one duty. A rejected event
    /// must leave the state untouched.
    fn process_event(
        &mut self,
        cfg: &Self::Config,
        event: Self::Event,
    ) -> Result<SMOutput<Self::Duty>, Self::Error>;
}
