//! Route configuration.

use axum::{routing::get, Router};

use crate::handlers::{job_routes, ping, user_routes};
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .nest("/jobs", job_routes())
        .nest("/users", user_routes())
        .with_state(state)
}
