//! Keeper tests against mock collaborators.

mod queries;
mod redemption_rate;
