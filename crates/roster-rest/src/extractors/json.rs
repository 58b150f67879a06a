//! JSON body extractor with API-shaped rejections.
//!
//! Axum's own `Json` rejection answers with plain text and splits syntax
//! errors (400) from type mismatches (422). Registration reserves 422 for
//! field validation, so every undecodable body is reported here as a 400
//! `INVALID_JSON` wrapped in the usual [`ApiResponse`](crate::responses::ApiResponse).

use crate::responses::error_response;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// JSON extractor whose rejection is an [`ApiResponse`](crate::responses::ApiResponse) error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T> std::ops::Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection for [`JsonBody`].
#[derive(Debug)]
pub struct JsonBodyRejection(JsonRejection);

impl JsonBodyRejection {
    /// Returns the HTTP status reported for this rejection.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self.0 {
            JsonRejection::MissingJsonContentType(_) => "UNSUPPORTED_MEDIA_TYPE",
            _ => "INVALID_JSON",
        }
    }
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        debug!(rejection = %self.0.body_text(), "Rejected request body");
        error_response(
            self.status(),
            self.code(),
            format!("Invalid JSON: {}", self.0.body_text()),
        )
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(JsonBodyRejection)?;

        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        age: Option<i32>,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_extracts_valid_body() {
        let JsonBody(payload) =
            JsonBody::<Payload>::from_request(request(Some("application/json"), r#"{"age": 30}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.age, Some(30));
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let rejection =
            JsonBody::<Payload>::from_request(request(Some("application/json"), "{\"age\":"), &())
                .await
                .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_bad_request() {
        let rejection = JsonBody::<Payload>::from_request(
            request(Some("application/json"), r#"{"age": "thirty"}"#),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported() {
        let rejection = JsonBody::<Payload>::from_request(request(None, r#"{"age": 30}"#), &())
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
