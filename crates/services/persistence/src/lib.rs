//! Persistence access layer.
//!
//! Owns the document-store connection and exposes insert/find operations for
//! jobs and users. Every operation runs under its own deadline and returns
//! either a valid entity or a classified [`StoreError`].
//!
//! ```rust,ignore
//! let config = StoreConfig::from_env();
//! let db = Database::connect(&config).await?;
//! let jobs = JobStore::new(db.jobs(), config.operation_timeout);
//!
//! let id = jobs.insert(&mut job, Deadline::none()).await?;
//! let stored = jobs.find_by_id(&id, Deadline::none()).await?;
//! ```

pub mod config;
pub mod deadline;
pub mod error;
pub mod infra;
pub mod repository;

pub use config::StoreConfig;
pub use deadline::Deadline;
pub use error::{StoreError, StoreResult};
pub use infra::{Database, DocumentCollection, MemoryCollection};
pub use repository::{JobRepository, JobStore, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use infra::MockDocumentCollection;
#[cfg(any(test, feature = "test-utils"))]
pub use repository::{MockJobRepository, MockUserRepository};
