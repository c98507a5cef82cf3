//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use domain::{Password, User};

use crate::error::{AppError, AppResult};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// User creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub role: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:username", get(get_user))
}

/// Register an account. The response never carries the password hash.
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let plain = req.password;
    let password = tokio::task::spawn_blocking(move || Password::hash(&plain))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))??;

    let mut user = User::new(req.username, password.into_string(), req.email);
    if let Some(role) = req.role {
        user = user.with_role(role);
    }

    state
        .users
        .insert(&mut user, state.request_deadline())
        .await
        .map_err(|e| AppError::from_store(e, "User"))?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<User>> {
    let user = state
        .users
        .find_by_username(&username, state.request_deadline())
        .await
        .map_err(|e| AppError::from_store(e, "User"))?;

    Ok(Json(user))
}
