//! Errors for the module parameters.

use thiserror::Error;

/// Error while validating [`ModuleParams`](crate::types::ModuleParams).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// A string parameter is empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// A numeric parameter is zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// Two epoch identifiers collide, so one of the hooks would never be distinguishable.
    #[error("epoch identifier {0:?} is used for more than one cadence")]
    DuplicateEpochIdentifier(String),

    /// The default page limit exceeds the maximum page limit.
    #[error("default page limit ({default}) exceeds max page limit ({max})")]
    PageLimit {
        /// The default page limit.
        default: u64,
        /// The maximum page limit.
        max: u64,
    },
}
