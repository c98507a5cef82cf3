//! User repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Document};

use domain::User;

use super::entities::{store_now, UserDocument};
use super::{object_id, single_match, LOOKUP_LIMIT};
use crate::deadline::{run_until, Deadline};
use crate::error::{StoreError, StoreResult};
use crate::infra::DocumentCollection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const INSERT_USER: &str = "insert_user";
const FIND_USER: &str = "find_user_by_username";

/// User persistence operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user whose identifier is unset. On success `user` is replaced
    /// by its stored form: assigned identifier, `created_at` stamp and
    /// timestamps at store precision.
    async fn insert(&self, user: &mut User, deadline: Deadline) -> StoreResult<String>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str, deadline: Deadline) -> StoreResult<User>;
}

/// Store-backed implementation of `UserRepository`
pub struct UserStore {
    collection: Arc<dyn DocumentCollection>,
    operation_timeout: Duration,
}

impl UserStore {
    pub fn new(collection: Arc<dyn DocumentCollection>, operation_timeout: Duration) -> Self {
        Self {
            collection,
            operation_timeout,
        }
    }

    /// Checks and stamps that happen before the write; no store contact.
    /// Returns the user as it will read back along with the document.
    fn stage(user: &User) -> StoreResult<(User, Document)> {
        if user.id.is_some() {
            return Err(StoreError::InvalidEntity(
                "identifier is assigned by the store".to_string(),
            ));
        }
        user.check()?;

        let mut staged = user.clone();
        staged.created_at = store_now();
        let document = UserDocument::from_user(&staged)?.to_document()?;
        let stored = UserDocument::from_document(document.clone())?.into();

        Ok((stored, document))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, user: &mut User, deadline: Deadline) -> StoreResult<String> {
        let deadline = deadline.bounded_by(self.operation_timeout);

        let (staged, document) = Self::stage(user).inspect_err(|e| e.trace(INSERT_USER))?;
        let inserted = run_until(
            INSERT_USER,
            deadline,
            self.collection.insert_document(document),
        )
        .await?;
        let id = object_id::encode_inserted(&inserted).inspect_err(|e| e.trace(INSERT_USER))?;

        *user = User {
            id: Some(id.clone()),
            ..staged
        };

        tracing::debug!(id = %id, username = %user.username, "User inserted");
        Ok(id)
    }

    async fn find_by_username(&self, username: &str, deadline: Deadline) -> StoreResult<User> {
        let deadline = deadline.bounded_by(self.operation_timeout);

        let documents = run_until(
            FIND_USER,
            deadline,
            self.collection
                .find_documents(doc! { "username": username }, LOOKUP_LIMIT),
        )
        .await?;

        let user = single_match(&self.collection.collection_name(), documents)
            .and_then(UserDocument::from_document)
            .inspect_err(|e| e.trace(FIND_USER))?;

        Ok(user.into())
    }
}
