//! Error taxonomy shared by every record store.

use crate::query::Table;

/// Failure of a record store operation.
///
/// `Clone` so screens can keep the last error in a signal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The backend answered with an error status.
    #[error("{message}")]
    Backend { status: Option<u16>, message: String },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// Rejected client-side; nothing was sent.
    #[error("{0}")]
    Validation(String),
    #[error("{table} record not found")]
    NotFound { table: Table },
    /// A row could not be converted to or from its record type.
    #[error("malformed {table} record: {message}")]
    Decode { table: Table, message: String },
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }

    pub fn backend(status: Option<u16>, message: impl Into<String>) -> Self {
        StoreError::Backend {
            status,
            message: message.into(),
        }
    }

    /// True when the request was rejected before reaching the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
