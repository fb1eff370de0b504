//! Vocabulary REST API Routes
//!
//! Word pairs owned by a user. Reads do not validate ids; a non-positive id
//! simply yields whatever the procedure returns (usually nothing).

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use wordbank_core::{UserId, VocabEntry, VocabId};

use crate::{
    db::DbClient,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, PathParam},
    types::{AddVocabRequest, AddVocabResponse, MessageResponse},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for vocabulary routes.
#[derive(Clone)]
pub struct VocabState {
    pub db: DbClient,
}

impl VocabState {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/vocab - Add a word pair for a user
pub async fn add_vocab(
    State(state): State<Arc<VocabState>>,
    ApiJson(req): ApiJson<AddVocabRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(|e| {
        ApiError::validation(&e, "User ID, KnownWord, and TargetWord are required.")
    })?;

    let vocab_id = state.db.vocab_add(&req).await?.ok_or_else(|| {
        tracing::warn!(user_id = req.user_id, "AddVocabulary returned no row");
        ApiError::operation_failed("Failed to add vocabulary.")
    })?;

    tracing::info!(user_id = req.user_id, vocab_id = %vocab_id, "Vocabulary added");

    Ok(Json(AddVocabResponse {
        message: "Vocabulary added".to_string(),
        vocab_id,
    }))
}

/// GET /api/vocab/all/:user_id - Every entry of a user, in database order
pub async fn list_all_vocab(
    State(state): State<Arc<VocabState>>,
    PathParam(user_id): PathParam<i32>,
) -> ApiResult<Json<Vec<VocabEntry>>> {
    let entries = state.db.vocab_list_all(UserId::new(user_id)).await?;
    Ok(Json(entries))
}

/// GET /api/vocab/:user_id/:vocab_id - A single entry
pub async fn get_vocab(
    State(state): State<Arc<VocabState>>,
    PathParam((user_id, vocab_id)): PathParam<(i32, i32)>,
) -> ApiResult<Json<VocabEntry>> {
    let entry = state
        .db
        .vocab_get(UserId::new(user_id), VocabId::new(vocab_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Vocabulary item not found."))?;

    Ok(Json(entry))
}

/// GET /api/vocab/unknown/:user_id - Entries not yet learnt
pub async fn list_unknown_vocab(
    State(state): State<Arc<VocabState>>,
    PathParam(user_id): PathParam<i32>,
) -> ApiResult<Json<Vec<VocabEntry>>> {
    list_by_learnt(&state, user_id, false).await
}

/// GET /api/vocab/known/:user_id - Learnt entries
pub async fn list_known_vocab(
    State(state): State<Arc<VocabState>>,
    PathParam(user_id): PathParam<i32>,
) -> ApiResult<Json<Vec<VocabEntry>>> {
    list_by_learnt(&state, user_id, true).await
}

async fn list_by_learnt(
    state: &VocabState,
    user_id: i32,
    learnt: bool,
) -> ApiResult<Json<Vec<VocabEntry>>> {
    let entries = state
        .db
        .vocab_list_by_learnt(UserId::new(user_id), learnt)
        .await?;
    Ok(Json(entries))
}

/// DELETE /api/vocab/:user_id/:vocab_id - Remove an entry
pub async fn delete_vocab(
    State(state): State<Arc<VocabState>>,
    PathParam((user_id, vocab_id)): PathParam<(i32, i32)>,
) -> ApiResult<impl IntoResponse> {
    let user_id = UserId::new(user_id);
    let vocab_id = VocabId::new(vocab_id);

    let status = state
        .db
        .vocab_delete(user_id, vocab_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id = %user_id, vocab_id = %vocab_id, "DeleteVocabulary returned no row");
            ApiError::operation_failed("Deletion failed.")
        })?;

    tracing::info!(user_id = %user_id, vocab_id = %vocab_id, status = %status, "Vocabulary deleted");

    Ok(Json(MessageResponse::new(status)))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the vocabulary routes router.
pub fn create_router(db: DbClient) -> Router {
    let state = Arc::new(VocabState::new(db));

    Router::new()
        .route("/", post(add_vocab))
        .route("/all/:user_id", get(list_all_vocab))
        .route("/unknown/:user_id", get(list_unknown_vocab))
        .route("/known/:user_id", get(list_known_vocab))
        .route("/:user_id/:vocab_id", get(get_vocab).delete(delete_vocab))
        .with_state(state)
}
