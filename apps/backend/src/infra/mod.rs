//! Infrastructure layer - database connection and error mapping.

pub mod db;
pub mod db_errors;
