//! Job repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Document};

use domain::Job;

use super::entities::{store_now, JobDocument};
use super::{object_id, single_match, LOOKUP_LIMIT};
use crate::deadline::{run_until, Deadline};
use crate::error::{StoreError, StoreResult};
use crate::infra::DocumentCollection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const INSERT_JOB: &str = "insert_job";
const FIND_JOB: &str = "find_job_by_id";

/// Job persistence operations.
///
/// Each call issues at most one store operation and runs under the earlier
/// of the caller's deadline and the store's per-operation timeout.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a job whose identifier is unset. On success `job` is replaced by
    /// its stored form: assigned identifier, `last_updated` stamp, timestamps
    /// at store precision, skills deduplicated and empty optionals cleared.
    async fn insert(&self, job: &mut Job, deadline: Deadline) -> StoreResult<String>;

    /// Find a job by its external identifier.
    async fn find_by_id(&self, id: &str, deadline: Deadline) -> StoreResult<Job>;
}

/// Store-backed implementation of `JobRepository`
pub struct JobStore {
    collection: Arc<dyn DocumentCollection>,
    operation_timeout: Duration,
}

impl JobStore {
    pub fn new(collection: Arc<dyn DocumentCollection>, operation_timeout: Duration) -> Self {
        Self {
            collection,
            operation_timeout,
        }
    }

    /// Checks and stamps that happen before the write; no store contact.
    /// Returns the job as it will read back along with the document.
    fn stage(job: &Job) -> StoreResult<(Job, Document)> {
        if job.id.is_some() {
            return Err(StoreError::InvalidEntity(
                "identifier is assigned by the store".to_string(),
            ));
        }
        job.check()?;

        let mut staged = job.clone();
        staged.last_updated = store_now();
        let document = JobDocument::from_job(&staged)?.to_document()?;
        let stored = JobDocument::from_document(document.clone())?.into();

        Ok((stored, document))
    }
}

#[async_trait]
impl JobRepository for JobStore {
    async fn insert(&self, job: &mut Job, deadline: Deadline) -> StoreResult<String> {
        let deadline = deadline.bounded_by(self.operation_timeout);

        let (staged, document) = Self::stage(job).inspect_err(|e| e.trace(INSERT_JOB))?;
        let inserted = run_until(
            INSERT_JOB,
            deadline,
            self.collection.insert_document(document),
        )
        .await?;
        let id = object_id::encode_inserted(&inserted).inspect_err(|e| e.trace(INSERT_JOB))?;

        *job = Job {
            id: Some(id.clone()),
            ..staged
        };

        tracing::debug!(id = %id, url = %job.url, "Job inserted");
        Ok(id)
    }

    async fn find_by_id(&self, id: &str, deadline: Deadline) -> StoreResult<Job> {
        let deadline = deadline.bounded_by(self.operation_timeout);

        let oid = object_id::decode(id).inspect_err(|e| e.trace(FIND_JOB))?;
        let documents = run_until(
            FIND_JOB,
            deadline,
            self.collection.find_documents(doc! { "_id": oid }, LOOKUP_LIMIT),
        )
        .await?;

        let job = single_match(&self.collection.collection_name(), documents)
            .and_then(JobDocument::from_document)
            .inspect_err(|e| e.trace(FIND_JOB))?;

        Ok(job.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use bson::Bson;
    use chrono::{TimeZone, Utc};

    use crate::infra::MockDocumentCollection;

    fn sample() -> Job {
        Job::new(
            "Software Engineer",
            "Tech Corp",
            "Remote",
            "Exciting opportunity for a software engineer",
            Utc::now(),
            "https://example.com/job",
        )
    }

    fn store(collection: MockDocumentCollection) -> JobStore {
        JobStore::new(Arc::new(collection), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_malformed_id_skips_store_call() {
        let mut collection = MockDocumentCollection::new();
        collection.expect_find_documents().never();

        let result = store(collection).find_by_id("not-an-id", Deadline::none()).await;

        assert_eq!(result, Err(StoreError::InvalidId("not-an-id".to_string())));
    }

    #[tokio::test]
    async fn test_find_queries_by_object_id_with_limit() {
        let oid = ObjectId::new();
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_find_documents()
            .withf(move |filter, limit| {
                filter.get_object_id("_id").ok() == Some(oid) && *limit == LOOKUP_LIMIT
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));
        collection
            .expect_collection_name()
            .return_const("jobs".to_string());

        let result = store(collection).find_by_id(&oid.to_hex(), Deadline::none()).await;

        assert_eq!(result, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_two_matches_is_inconsistency() {
        let oid = ObjectId::new();
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_find_documents()
            .returning(move |_, _| Ok(vec![doc! { "_id": oid }, doc! { "_id": oid }]));
        collection
            .expect_collection_name()
            .return_const("jobs".to_string());

        let result = store(collection).find_by_id(&oid.to_hex(), Deadline::none()).await;

        assert!(matches!(result, Err(StoreError::InternalInconsistency(_))));
    }

    #[tokio::test]
    async fn test_undecodable_document_is_inconsistency() {
        let oid = ObjectId::new();
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_find_documents()
            .returning(move |_, _| Ok(vec![doc! { "_id": oid, "title": 42 }]));
        collection
            .expect_collection_name()
            .return_const("jobs".to_string());

        let result = store(collection).find_by_id(&oid.to_hex(), Deadline::none()).await;

        assert!(matches!(result, Err(StoreError::InternalInconsistency(_))));
    }

    #[tokio::test]
    async fn test_insert_rejects_preset_id() {
        let mut collection = MockDocumentCollection::new();
        collection.expect_insert_document().never();

        let mut job = sample();
        job.id = Some(ObjectId::new().to_hex());
        let result = store(collection).insert(&mut job, Deadline::none()).await;

        assert!(matches!(result, Err(StoreError::InvalidEntity(_))));
    }

    #[tokio::test]
    async fn test_insert_rejects_missing_title() {
        let mut collection = MockDocumentCollection::new();
        collection.expect_insert_document().never();

        let mut job = sample();
        job.title.clear();
        let result = store(collection).insert(&mut job, Deadline::none()).await;

        assert!(matches!(result, Err(StoreError::InvalidEntity(ref m)) if m.contains("title")));
        assert!(job.id.is_none());
    }

    #[tokio::test]
    async fn test_insert_writes_back_id_and_stamp() {
        let oid = ObjectId::new();
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_insert_document()
            .withf(|document| !document.contains_key("_id") && document.contains_key("last_updated"))
            .times(1)
            .returning(move |_| Ok(Bson::ObjectId(oid)));

        let mut job = sample();
        let before = job.last_updated;
        let id = store(collection).insert(&mut job, Deadline::none()).await.unwrap();

        assert_eq!(id, oid.to_hex());
        assert_eq!(job.id.as_deref(), Some(id.as_str()));
        assert_eq!(job.last_updated.timestamp_subsec_micros() % 1000, 0);
        assert!(job.last_updated >= before - chrono::Duration::milliseconds(1));
    }

    #[tokio::test]
    async fn test_insert_leaves_caller_with_stored_form() {
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_insert_document()
            .returning(|_| Ok(Bson::ObjectId(ObjectId::new())));

        let mut job = sample();
        job.posted_date = Utc.timestamp_opt(1_717_171_717, 171_717_171).unwrap();
        job.required_skills = vec!["rust".into(), "sql".into(), "rust".into()];
        job.salary = Some(String::new());

        store(collection).insert(&mut job, Deadline::none()).await.unwrap();

        assert_eq!(job.posted_date, Utc.timestamp_millis_opt(1_717_171_717_171).unwrap());
        assert_eq!(job.required_skills, vec!["rust", "sql"]);
        assert_eq!(job.salary, None);
    }

    #[tokio::test]
    async fn test_insert_surfaces_duplicate_key() {
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_insert_document()
            .returning(|_| Err(StoreError::duplicate_key("E11000 duplicate key error")));

        let mut job = sample();
        let result = store(collection).insert(&mut job, Deadline::none()).await;

        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
        assert!(job.id.is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_non_object_id() {
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_insert_document()
            .returning(|_| Ok(Bson::String("custom".to_string())));

        let mut job = sample();
        let result = store(collection).insert(&mut job, Deadline::none()).await;

        assert!(matches!(result, Err(StoreError::InternalInconsistency(_))));
        assert!(job.id.is_none());
    }
}
