//! Infrastructure layer - store connection and collection backends.

mod collection;
mod db;
mod memory;

pub use collection::DocumentCollection;
pub use db::{ensure_natural_key_indexes, Database, JOB_NATURAL_KEY, USER_NATURAL_KEY};
pub use memory::MemoryCollection;

#[cfg(any(test, feature = "test-utils"))]
pub use collection::MockDocumentCollection;
