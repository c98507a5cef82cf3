//! Store error taxonomy.
//!
//! Every access-layer operation ends in exactly one of a valid entity or one
//! of these variants. Driver errors are classified here so callers never
//! inspect driver types.

use std::io;

use domain::DomainError;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Server error code for an operation that exceeded its server-side time limit
const MAX_TIME_EXPIRED_CODE: i32 = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A keyed lookup matched zero documents
    #[error("Document not found")]
    NotFound,

    /// A store-side uniqueness constraint rejected the write
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A lookup identifier could not be decoded into the store's native form
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// The entity broke a field rule before any write was attempted
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    /// The call's deadline elapsed before the store answered
    #[error("Deadline exceeded")]
    Timeout,

    /// Transport-level failure or the store is unreachable
    #[error("Store connection failure: {0}")]
    ConnectionFailure(String),

    /// A store invariant was observed broken
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// Any other store-reported failure
    #[error("Store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn duplicate_key(detail: impl Into<String>) -> Self {
        StoreError::DuplicateKey(detail.into())
    }

    pub fn invalid_id(id: impl Into<String>) -> Self {
        StoreError::InvalidId(id.into())
    }

    pub fn connection(detail: impl Into<String>) -> Self {
        StoreError::ConnectionFailure(detail.into())
    }

    pub fn inconsistency(detail: impl Into<String>) -> Self {
        StoreError::InternalInconsistency(detail.into())
    }

    /// Whether the outcome is part of normal operation rather than a failure.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound
                | StoreError::DuplicateKey(_)
                | StoreError::InvalidId(_)
                | StoreError::InvalidEntity(_)
        )
    }

    /// Log the outcome of `operation` at a level matching its severity.
    pub(crate) fn trace(&self, operation: &str) {
        match self {
            _ if self.is_expected() => {
                tracing::debug!(operation, error = %self, "store operation rejected")
            }
            StoreError::Timeout => tracing::warn!(operation, "store operation timed out"),
            _ => tracing::error!(operation, error = %self, "store operation failed"),
        }
    }
}

impl From<MongoError> for StoreError {
    fn from(err: MongoError) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => {
                StoreError::DuplicateKey(e.message.clone())
            }
            ErrorKind::Command(e) if e.code == DUPLICATE_KEY_CODE => {
                StoreError::DuplicateKey(e.message.clone())
            }
            ErrorKind::Command(e) if e.code == MAX_TIME_EXPIRED_CODE => StoreError::Timeout,
            ErrorKind::Io(e) if e.kind() == io::ErrorKind::TimedOut => StoreError::Timeout,
            ErrorKind::Io(_)
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::Authentication { .. } => StoreError::ConnectionFailure(err.to_string()),
            ErrorKind::BsonDeserialization(e) => StoreError::InternalInconsistency(e.to_string()),
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(err: bson::de::Error) -> Self {
        // A stored document that does not fit the field mapping breaks the
        // round-trip invariant.
        StoreError::InternalInconsistency(format!("undecodable document: {}", err))
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Backend(format!("unencodable document: {}", err))
    }
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Password(msg) => {
                StoreError::InvalidEntity(msg)
            }
        }
    }
}

/// Result type alias for access-layer operations
pub type StoreResult<T> = Result<T, StoreError>;
