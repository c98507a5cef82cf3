//! Stored-document shapes.
//!
//! Field names here are the wire contract with the store. Domain values are
//! converted on the way in and out; nothing outside this module sees
//! `ObjectId` or `bson::DateTime`.

pub mod job;
pub mod user;

use chrono::{DateTime, Utc};

pub use job::JobDocument;
pub use user::UserDocument;

/// Current time at the store's precision (milliseconds).
pub fn store_now() -> DateTime<Utc> {
    bson::DateTime::now().to_chrono()
}

/// Treat `Some("")` as absent so empty optionals are never stored.
pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
