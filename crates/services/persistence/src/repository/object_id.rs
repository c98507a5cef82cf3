//! Identifier encoding.
//!
//! The only place that converts between the external string form of an
//! identifier (24 hex characters) and the store's native `ObjectId`.

use bson::oid::ObjectId;
use bson::Bson;

use crate::error::{StoreError, StoreResult};

/// Decode an external identifier. Malformed input is `InvalidId`.
pub fn decode(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::invalid_id(id))
}

pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}

/// Encode the identifier the store reported for a fresh insert.
pub fn encode_inserted(value: &Bson) -> StoreResult<String> {
    value
        .as_object_id()
        .map(|oid| encode(&oid))
        .ok_or_else(|| StoreError::inconsistency(format!("store assigned a non-ObjectId identifier: {}", value)))
}
