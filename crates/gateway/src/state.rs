//! Application state for dependency injection.

use std::sync::Arc;
use std::time::Duration;

use persistence::{Database, Deadline, JobRepository, JobStore, UserRepository, UserStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobRepository>,
    pub users: Arc<dyn UserRepository>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        users: Arc<dyn UserRepository>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            jobs,
            users,
            request_timeout,
        }
    }

    /// Build store-backed repositories over an open connection.
    pub fn from_database(db: &Database, operation_timeout: Duration, request_timeout: Duration) -> Self {
        Self::new(
            Arc::new(JobStore::new(db.jobs(), operation_timeout)),
            Arc::new(UserStore::new(db.users(), operation_timeout)),
            request_timeout,
        )
    }

    /// Deadline for store calls made while serving the current request.
    pub fn request_deadline(&self) -> Deadline {
        Deadline::within(self.request_timeout)
    }
}
