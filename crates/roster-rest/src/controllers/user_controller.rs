//! User registration controller.

use crate::{
    extractors::JsonBody,
    middleware::REQUEST_ID_HEADER,
    responses::{created, AppError, CreatedResult},
    state::AppState,
};
use axum::{extract::State, http::HeaderMap, routing::post, Router};
use roster_core::ErrorResponse;
use roster_service::{RegisterUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(register_user))
}

/// Register a new user.
///
/// Every failing field is reported at once under `error.details`. Error
/// bodies carry the request ID as `trace_id`.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered; the user is returned under `data`", body = UserResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 422, description = "One or more fields are invalid, or the email is taken", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<RegisterUserRequest>,
) -> CreatedResult<UserResponse> {
    let trace_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    debug!(
        interests = request.interests.len(),
        trace_id = ?trace_id,
        "Register user request"
    );

    let response = state
        .registration_service
        .register_user(request)
        .await
        .map_err(|err| AppError::from(err).with_trace_id(trace_id))?;
    created(response)
}
