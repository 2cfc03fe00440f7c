//! Backend test support utilities
//!
//! Shared by the unit tests and integration tests of the backend: one-time
//! logging bootstrap and unique test data helpers.

pub mod logging;
pub mod unique_helpers;

pub use unique_helpers::{unique_login, unique_str};
