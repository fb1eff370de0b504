//! Request extractors that reject with [`ApiError`].
//!
//! Axum's stock `Json` and `Path` answer malformed input with their own
//! status codes (415, 422) and plain-text bodies. These wrappers run the
//! same extraction but turn every rejection into a 400 `VALIDATION_FAILED`
//! JSON error, so clients see one error shape for any bad input.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body.
///
/// ```rust,ignore
/// async fn add_user(ApiJson(req): ApiJson<AddUserRequest>) -> ApiResult<impl IntoResponse> {
///     // a body that fails to parse never reaches this point
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Path parameters, a single value or a tuple.
///
/// ```rust,ignore
/// // For route: /vocab/:user_id/:vocab_id
/// async fn get_vocab(PathParam((user_id, vocab_id)): PathParam<(i32, i32)>) { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(PathParam(value))
    }
}
