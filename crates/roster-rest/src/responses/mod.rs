//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::{ErrorResponse, RosterError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(error: ErrorResponse) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError {
    error: RosterError,
    trace_id: Option<String>,
}

impl AppError {
    /// Tags the error body with the request's trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: Option<String>) -> Self {
        self.trace_id = trace_id;
        self
    }
}

impl From<RosterError> for AppError {
    fn from(error: RosterError) -> Self {
        Self {
            error,
            trace_id: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut error_response = ErrorResponse::from_error(&self.error);
        if let Some(trace_id) = self.trace_id {
            error_response = error_response.with_trace_id(trace_id);
        }
        if status.is_server_error() {
            error!(error = %self.error, trace_id = ?error_response.trace_id, "Request failed");
            error_response.message = "Internal server error".to_string();
        }

        (status, Json(ApiResponse::<()>::error(error_response))).into_response()
    }
}

/// Builds a bare error body for failures raised before a handler runs.
pub fn error_response(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> Response {
    let body = ErrorResponse {
        code: code.into(),
        message: message.into(),
        details: None,
        trace_id: None,
    };
    (status, Json(ApiResponse::<()>::error(body))).into_response()
}

/// Response of a handler that creates a resource.
pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}
