//! Re-exports of the parameter types.

pub use crate::{errors::ParamsError, types::ModuleParams};
