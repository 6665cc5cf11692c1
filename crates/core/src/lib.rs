//! Shared primitives for all Rust crates in Freightline.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Result type used across Freightline crates.
pub type AppResult<T> = Result<T, AppError>;

/// Brokerage-firm identifier carried by identities and directory records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirmId(Uuid);

impl FirmId {
    /// Creates a random firm identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a firm identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FirmId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FirmId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or holds no live session.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Backend or network unavailable; the call may succeed later.
    #[error("transport error: {0}")]
    Transport(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns whether this error means the caller should re-authenticate.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, FirmId};

    #[test]
    fn firm_id_formats_as_uuid() {
        let firm_id = FirmId::new();
        assert_eq!(firm_id.to_string().len(), 36);
    }

    #[test]
    fn unauthorized_is_an_authentication_error() {
        assert!(AppError::Unauthorized("no session".to_owned()).is_authentication());
        assert!(!AppError::Transport("offline".to_owned()).is_authentication());
    }
}
