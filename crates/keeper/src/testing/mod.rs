//! Mock collaborators and fixtures for keeper tests.

pub(crate) mod fixtures;
pub(crate) mod mocks;
