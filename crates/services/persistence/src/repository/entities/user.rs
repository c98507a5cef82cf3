//! User document mapping.

use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

use domain::User;

use crate::error::StoreResult;
use crate::repository::object_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub created_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<bson::DateTime>,
    pub role: String,
}

impl UserDocument {
    /// Map a domain user, decoding its identifier if one is set.
    pub fn from_user(user: &User) -> StoreResult<Self> {
        let id = user.id.as_deref().map(object_id::decode).transpose()?;

        Ok(Self {
            id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            email: user.email.clone(),
            created_at: bson::DateTime::from_chrono(user.created_at),
            last_login: user.last_login.map(bson::DateTime::from_chrono),
            role: user.role.clone(),
        })
    }

    pub fn to_document(&self) -> StoreResult<Document> {
        Ok(bson::to_document(self)?)
    }

    pub fn from_document(document: Document) -> StoreResult<Self> {
        Ok(bson::from_document(document)?)
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: doc.id.as_ref().map(object_id::encode),
            username: doc.username,
            password_hash: doc.password_hash,
            email: doc.email,
            created_at: doc.created_at.to_chrono(),
            last_login: doc.last_login.map(|at| at.to_chrono()),
            role: doc.role,
        }
    }
}
