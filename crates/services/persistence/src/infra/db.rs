//! Store connection and initialization.

use std::sync::Arc;
use std::time::Duration;

use bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use tokio::time::Instant;

use domain::{JOBS_COLLECTION, USERS_COLLECTION};

use super::collection::DocumentCollection;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

const APP_NAME: &str = "job-store";

/// Process-wide store handle.
///
/// Cloning is cheap and shares the underlying connection pool. Built once at
/// startup and never reopened; a dropped connection surfaces as
/// `ConnectionFailure` on the next operation.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
}

impl Database {
    /// Connect and verify liveness with a ping, all within the connect
    /// deadline. No retry: a failure here is fatal to startup.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let deadline = Instant::now() + config.connect_timeout;

        let attempt = async {
            let mut options = ClientOptions::parse(&config.uri).await?;
            options.app_name = Some(APP_NAME.to_string());
            let selection_timeout = server_selection_timeout(config);
            options.connect_timeout = Some(selection_timeout);
            options.server_selection_timeout = Some(selection_timeout);

            let client = Client::with_options(options)?;
            let database = client.database(&config.database);
            database.run_command(doc! { "ping": 1 }, None).await?;

            Ok::<_, mongodb::error::Error>(Self { client, database })
        };

        let db = match tokio::time::timeout_at(deadline, attempt).await {
            Ok(Ok(db)) => db,
            Ok(Err(e)) => return Err(StoreError::connection(e.to_string())),
            Err(_) => {
                tracing::error!(
                    timeout = ?config.connect_timeout,
                    "Store did not answer the startup ping in time"
                );
                return Err(StoreError::Timeout);
            }
        };

        tracing::info!(
            database = %config.database,
            jobs = JOBS_COLLECTION,
            users = USERS_COLLECTION,
            "Store connected"
        );

        Ok(db)
    }

    /// Database name in use.
    pub fn name(&self) -> &str {
        self.database.name()
    }

    /// Handle to the jobs collection.
    pub fn jobs(&self) -> Arc<dyn DocumentCollection> {
        Arc::new(self.database.collection::<Document>(JOBS_COLLECTION))
    }

    /// Handle to the users collection.
    pub fn users(&self) -> Arc<dyn DocumentCollection> {
        Arc::new(self.database.collection::<Document>(USERS_COLLECTION))
    }

    /// Create the natural-key unique indexes (job URL, username).
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        ensure_natural_key_indexes(self.jobs().as_ref(), self.users().as_ref()).await?;
        tracing::info!("Unique indexes ensured");
        Ok(())
    }

    /// Round-trip liveness probe.
    pub async fn ping(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Close the client and its pool.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("Store connection closed");
    }
}

/// Driver-side give-up time for finding a usable server.
///
/// Strictly inside both the connect deadline and the per-operation deadline:
/// an unreachable store must surface as `ConnectionFailure`, not `Timeout`.
fn server_selection_timeout(config: &StoreConfig) -> Duration {
    config.connect_timeout.min(config.operation_timeout) / 2
}

/// Field carrying the job natural key
pub const JOB_NATURAL_KEY: &str = "url";

/// Field carrying the user natural key
pub const USER_NATURAL_KEY: &str = "username";

/// Create the unique indexes on any pair of collection backends.
pub async fn ensure_natural_key_indexes(
    jobs: &dyn DocumentCollection,
    users: &dyn DocumentCollection,
) -> StoreResult<()> {
    jobs.ensure_unique_index(JOB_NATURAL_KEY).await?;
    users.ensure_unique_index(USER_NATURAL_KEY).await?;
    Ok(())
}
