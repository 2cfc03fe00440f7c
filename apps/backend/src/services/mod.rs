//! Load-modify-store flows over the repositories.

pub mod games;
pub mod users;

pub use games::JoinPolicy;
