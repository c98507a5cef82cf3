//! Collection abstraction over the document store.

use async_trait::async_trait;
use bson::{Bson, Document};
use futures::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, IndexModel};

use crate::error::StoreResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// The store operations the access layer needs from one collection.
///
/// Implementations must be safe to share across tasks; the repositories hold
/// them behind `Arc` for the life of the process.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Collection name, for logs and error detail
    fn collection_name(&self) -> String;

    /// Write one document and return the identifier the store assigned
    async fn insert_document(&self, document: Document) -> StoreResult<Bson>;

    /// Return at most `limit` documents whose fields equal `filter`
    async fn find_documents(&self, filter: Document, limit: i64) -> StoreResult<Vec<Document>>;

    /// Create an ascending unique index on a single field
    async fn ensure_unique_index(&self, field: &str) -> StoreResult<()>;
}

#[async_trait]
impl DocumentCollection for Collection<Document> {
    fn collection_name(&self) -> String {
        self.name().to_string()
    }

    async fn insert_document(&self, document: Document) -> StoreResult<Bson> {
        let result = self.insert_one(document, None).await?;
        Ok(result.inserted_id)
    }

    async fn find_documents(&self, filter: Document, limit: i64) -> StoreResult<Vec<Document>> {
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self.find(filter, options).await?;
        let documents = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn ensure_unique_index(&self, field: &str) -> StoreResult<()> {
        let mut keys = Document::new();
        keys.insert(field, 1);

        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.create_index(index, None).await?;
        Ok(())
    }
}
