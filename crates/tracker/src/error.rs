//! The module contains the errors the tracker can throw.
//!
//! Not-owned entities are reported as [`KeyNotFound`] rather than
//! [`Forbidden`] so an attacker cannot probe for other users' rows.
//!
//! [`KeyNotFound`]: TrackerError::KeyNotFound
//! [`Forbidden`]: TrackerError::Forbidden
use sea_orm::DbErr;
use thiserror::Error;

/// Tracker custom errors.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("\"{0}\" still referenced!")]
    InUse(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for TrackerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InUse(a), Self::InUse(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
