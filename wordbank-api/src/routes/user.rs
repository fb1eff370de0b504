//! User REST API Routes
//!
//! Registration, lookup by user name and deletion. Each handler validates
//! its input, issues exactly one stored-procedure call and maps the
//! outcome to a status code.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use wordbank_core::UserId;

use crate::{
    db::DbClient,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, PathParam},
    types::{AddUserRequest, AddUserResponse, MessageResponse, UserIdResponse},
    validation::{ValidateNonEmpty, ValidatePositive},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for user routes.
#[derive(Clone)]
pub struct UserState {
    pub db: DbClient,
}

impl UserState {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/user - Register a new user
pub async fn add_user(
    State(state): State<Arc<UserState>>,
    ApiJson(req): ApiJson<AddUserRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()
        .map_err(|e| ApiError::validation(&e, "All fields are required"))?;

    let user_id = state
        .db
        .user_add(&req)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_name = ?req.user_name, "AddUser returned no row");
            ApiError::operation_failed("User could not be added.")
        })?;

    tracing::info!(user_id = %user_id, user_name = ?req.user_name, "User added");

    Ok(Json(AddUserResponse {
        message: "User successfully added.".to_string(),
        user_id,
    }))
}

/// GET /api/user/:user - Look up a user id by user name
pub async fn get_user_id(
    State(state): State<Arc<UserState>>,
    PathParam(user_name): PathParam<String>,
) -> ApiResult<impl IntoResponse> {
    user_name
        .validate_non_empty("userName")
        .map_err(|e| ApiError::validation(&e, "User name is required"))?;

    let user_id = state
        .db
        .user_id_by_name(&user_name)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserIdResponse { user_id }))
}

/// DELETE /api/user/:user - Delete a user by id
pub async fn delete_user(
    State(state): State<Arc<UserState>>,
    PathParam(user_id): PathParam<i32>,
) -> ApiResult<impl IntoResponse> {
    let user_id = UserId::new(user_id);
    user_id
        .validate_positive("userId")
        .map_err(|e| ApiError::validation(&e, "Invalid user id"))?;

    let status = state.db.user_delete(user_id).await?.ok_or_else(|| {
        tracing::warn!(user_id = %user_id, "DeleteUser returned no row");
        ApiError::operation_failed("User could not be deleted.")
    })?;

    tracing::info!(user_id = %user_id, status = %status, "User deleted");

    Ok(Json(MessageResponse::new(status)))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the user routes router.
///
/// Lookup takes a user name and deletion an integer id at the same path
/// position, so both live on one route.
pub fn create_router(db: DbClient) -> Router {
    let state = Arc::new(UserState::new(db));

    Router::new()
        .route("/", post(add_user))
        .route("/:user", get(get_user_id).delete(delete_user))
        .with_state(state)
}
