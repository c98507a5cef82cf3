//! Domain-level errors.
//!
//! These describe values that break a field rule. They carry no store or
//! transport detail.

use thiserror::Error;
use validator::ValidationErrors;

/// Domain-specific errors for field rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password could not be accepted or hashed
    #[error("Password error: {0}")]
    Password(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        // Report fields in a stable order so messages are predictable.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .map(|(field, errs)| {
                let detail = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{}: {}", field, detail)
            })
            .collect::<Vec<_>>()
            .join("; ");

        DomainError::Validation(message)
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
