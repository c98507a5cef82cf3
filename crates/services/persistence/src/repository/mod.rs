//! Repository layer - typed operations over the store collections.

pub mod entities;
mod job_repository;
pub mod object_id;
mod user_repository;

use bson::Document;

use crate::error::{StoreError, StoreResult};

pub use job_repository::{JobRepository, JobStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use job_repository::MockJobRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Keyed lookups ask for one more match than they accept so a broken
/// uniqueness invariant is observable.
pub(crate) const LOOKUP_LIMIT: i64 = 2;

/// Reduce a keyed lookup to its single match.
pub(crate) fn single_match(collection: &str, mut documents: Vec<Document>) -> StoreResult<Document> {
    match documents.len() {
        0 => Err(StoreError::NotFound),
        1 => Ok(documents.remove(0)),
        n => Err(StoreError::inconsistency(format!(
            "{} documents in {} share a unique key",
            n, collection
        ))),
    }
}
