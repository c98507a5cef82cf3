//! Domain layer - job postings and user accounts.
//!
//! Pure value types with no store or transport dependencies. The stored
//! document shape lives in the persistence crate; the types here define the
//! caller-facing representation and the field rules checked before a write.

pub mod constants;
pub mod error;
pub mod job;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use job::Job;
pub use password::Password;
pub use user::User;
