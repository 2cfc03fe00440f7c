#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::db::{db_url, DbKind, DbProfile};
pub use domain::{decision_beats, Decision, Game, GameStatus, GameTurn};
pub use error::AppError;
pub use errors::DomainError;
pub use infra::db::{bootstrap_db, connect_db};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
