//! Liveness endpoint.

use axum::response::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}

/// Process liveness; does not touch the store.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}
