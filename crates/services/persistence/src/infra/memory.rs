//! In-process collection backend.
//!
//! Behaves like a single store collection for the operations the access layer
//! uses: store-assigned `ObjectId`s, unique single-field indexes, equality
//! filters and match limits. Latency and outages can be injected so deadline
//! and transport paths are reachable without a running server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};

use super::collection::DocumentCollection;
use crate::error::{StoreError, StoreResult};

const ID_FIELD: &str = "_id";

#[derive(Default)]
struct State {
    documents: Vec<Document>,
    unique_fields: Vec<String>,
}

/// A collection held in memory.
pub struct MemoryCollection {
    name: String,
    state: Mutex<State>,
    latency: Option<Duration>,
    offline: AtomicBool,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(State::default()),
            latency: None,
            offline: AtomicBool::new(false),
        }
    }

    /// Delay every insert and find by `latency` before it reaches the data.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Declare a unique index up front.
    pub fn with_unique_index(self, field: impl Into<String>) -> Self {
        self.lock().unique_fields.push(field.into());
        self
    }

    /// Simulate the store becoming unreachable (or reachable again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Write a document as-is, bypassing identifier assignment and unique
    /// indexes. Used to stage states the store would normally refuse.
    pub fn seed(&self, document: Document) {
        self.lock().documents.push(document);
    }

    /// Copy of every stored document in insertion order.
    pub fn documents(&self) -> Vec<Document> {
        self.lock().documents.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn round_trip(&self) -> StoreResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::connection(format!(
                "collection {} is unreachable",
                self.name
            )));
        }
        Ok(())
    }

    fn duplicate(&self, field: &str, value: &Bson) -> StoreError {
        StoreError::duplicate_key(format!(
            "E11000 duplicate key error collection: {} index: {}_1 dup key: {{ {}: {} }}",
            self.name, field, field, value
        ))
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn collection_name(&self) -> String {
        self.name.clone()
    }

    async fn insert_document(&self, document: Document) -> StoreResult<Bson> {
        self.round_trip().await?;

        let mut stored = Document::new();
        let id = document
            .get(ID_FIELD)
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));
        stored.insert(ID_FIELD, id.clone());
        for (key, value) in document {
            if key != ID_FIELD {
                stored.insert(key, value);
            }
        }

        let mut state = self.lock();
        let keys = std::iter::once(ID_FIELD.to_string()).chain(state.unique_fields.clone());
        for field in keys {
            if let Some(value) = stored.get(&field) {
                if state.documents.iter().any(|d| d.get(&field) == Some(value)) {
                    return Err(self.duplicate(&field, value));
                }
            }
        }

        state.documents.push(stored);
        Ok(id)
    }

    async fn find_documents(&self, filter: Document, limit: i64) -> StoreResult<Vec<Document>> {
        self.round_trip().await?;

        let state = self.lock();
        let matches = state
            .documents
            .iter()
            .filter(|d| filter.iter().all(|(key, value)| d.get(key) == Some(value)))
            .cloned();

        Ok(if limit > 0 {
            matches.take(limit as usize).collect()
        } else {
            matches.collect()
        })
    }

    async fn ensure_unique_index(&self, field: &str) -> StoreResult<()> {
        let mut state = self.lock();
        if state.unique_fields.iter().any(|f| f == field) {
            return Ok(());
        }

        // Index builds fail if existing documents already collide.
        let mut seen: Vec<&Bson> = Vec::new();
        for value in state.documents.iter().filter_map(|d| d.get(field)) {
            if seen.contains(&value) {
                return Err(self.duplicate(field, value));
            }
            seen.push(value);
        }

        state.unique_fields.push(field.to_string());
        Ok(())
    }
}
