//! Error handling for the roshambo backend.

pub mod domain;

pub use domain::DomainError;
