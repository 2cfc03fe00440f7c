//! Repository functions for the domain layer.

pub mod game_turns;
pub mod games;
pub mod users;

use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Domain counters are `u32`; the store keeps signed 32-bit integers.
pub(crate) fn to_db_int(value: u32, field: &str) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        DomainError::validation(
            ValidationKind::Other(field.to_string()),
            format!("{field} {value} does not fit the store"),
        )
    })
}

pub(crate) fn from_db_int(value: i32, field: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("stored {field} is negative: {value}"),
        )
    })
}

pub(crate) fn corrupt_document(what: &str, e: serde_json::Error) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("stored {what} document is malformed: {e}"),
    )
}
