//! HTTP-level tests for the registration API.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use roster_config::ServerConfig;
use roster_core::{
    codes, messages, FieldErrors, Gender, HealthCheck, HealthStatus, InterestId, RosterError,
    RosterResult, UserId,
};
use roster_rest::{create_router, AppState};
use roster_service::{InterestResponse, RegisterUserRequest, RegistrationService, UserResponse};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Accepts any request with a name, and treats `taken@example.com` as registered.
#[derive(Default)]
struct FakeRegistrationService {
    received: Mutex<Vec<RegisterUserRequest>>,
}

#[async_trait]
impl RegistrationService for FakeRegistrationService {
    async fn register_user(&self, request: RegisterUserRequest) -> RosterResult<UserResponse> {
        self.received.lock().unwrap().push(request.clone());

        let mut errors = FieldErrors::new();
        if request.name.as_deref().unwrap_or_default().is_empty() {
            errors.add("name", codes::BLANK, messages::BLANK);
        }
        if request.email.as_deref() == Some("taken@example.com") {
            errors.add("email", codes::TAKEN, messages::TAKEN);
        }
        if request.email.as_deref() == Some("broken@example.com") {
            return Err(RosterError::Database("connection reset by peer".to_string()));
        }
        errors.into_result()?;

        let now = Utc::now();
        Ok(UserResponse {
            id: UserId::new(),
            name: request.name.unwrap_or_default(),
            patronymic: request.patronymic.unwrap_or_default(),
            surname: request.surname,
            email: request.email.unwrap_or_default(),
            age: request.age.unwrap_or_default(),
            nationality: request.nationality.unwrap_or_default(),
            country: request.country.unwrap_or_default(),
            gender: Gender::Female,
            full_name: "Petrova Anna Sergeevna".to_string(),
            interests: request
                .interests
                .into_iter()
                .map(|name| InterestResponse {
                    id: InterestId::new(),
                    name,
                })
                .collect(),
            skills: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }
}

struct StaticHealthCheck(HealthStatus);

#[async_trait]
impl HealthCheck for StaticHealthCheck {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        self.0.clone()
    }
}

fn app(service: Arc<FakeRegistrationService>, health: Option<HealthStatus>) -> Router {
    let mut state = AppState::new(service);
    if let Some(status) = health {
        state = state.with_health_check(Arc::new(StaticHealthCheck(status)));
    }
    create_router(state, &ServerConfig::default())
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/users")
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid_payload() -> Value {
    json!({
        "name": "Anna",
        "patronymic": "Sergeevna",
        "surname": "Petrova",
        "email": "anna@example.com",
        "age": 28,
        "nationality": "Russian",
        "country": "Russia",
        "gender": "female",
        "interests": ["chess"],
        "skills": "Rust, SQL"
    })
}

#[tokio::test]
async fn test_register_returns_created_user() {
    let service = Arc::new(FakeRegistrationService::default());
    let response = app(service.clone(), None)
        .oneshot(post_json(valid_payload().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "anna@example.com");
    assert_eq!(body["data"]["full_name"], "Petrova Anna Sergeevna");
    assert_eq!(body["data"]["interests"][0]["name"], "chess");
    assert!(body.get("error").is_none());

    let received = service.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].skill_names(), vec!["Rust", "SQL"]);
}

#[tokio::test]
async fn test_register_reports_every_field_error() {
    let mut payload = valid_payload();
    payload["name"] = json!("");
    payload["email"] = json!("taken@example.com");

    let response = app(Arc::default(), None)
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert!(details
        .iter()
        .any(|d| d["field"] == "email" && d["message"] == messages::TAKEN));
    assert!(details
        .iter()
        .any(|d| d["field"] == "name" && d["code"] == codes::BLANK));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let service = Arc::new(FakeRegistrationService::default());
    let response = app(service.clone(), None)
        .oneshot(post_json("{\"name\": "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_JSON");
    assert!(service.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_wrongly_typed_field_is_bad_request() {
    let mut payload = valid_payload();
    payload["age"] = json!("twenty");

    let response = app(Arc::default(), None)
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_storage_failure_hides_details() {
    let mut payload = valid_payload();
    payload["email"] = json!("broken@example.com");

    let response = app(Arc::default(), None)
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    assert!(!body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("connection reset"));
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let response = app(Arc::default(), None)
        .oneshot(post_json(valid_payload().to_string()))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_error_body_trace_id_matches_request_id() {
    let mut payload = valid_payload();
    payload["email"] = json!("taken@example.com");

    let response = app(Arc::default(), None)
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let request_id = response.headers()["x-request-id"]
        .to_str()
        .unwrap()
        .to_string();
    let body = body_json(response).await;
    assert_eq!(body["error"]["trace_id"], request_id.as_str());
}

#[tokio::test]
async fn test_null_interests_and_skills_are_accepted() {
    let service = Arc::new(FakeRegistrationService::default());
    let mut payload = valid_payload();
    payload["interests"] = Value::Null;
    payload["skills"] = Value::Null;

    let response = app(service.clone(), None)
        .oneshot(post_json(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["interests"], json!([]));

    let received = service.received.lock().unwrap();
    assert!(received[0].interests.is_empty());
    assert!(received[0].skill_names().is_empty());
}

#[tokio::test]
async fn test_health_and_liveness() {
    let router = app(Arc::default(), None);

    let health = router.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(body_json(health).await["status"], "healthy");

    let live = router.oneshot(get("/live")).await.unwrap();
    assert_eq!(live.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_ready_when_dependencies_are_healthy() {
    let response = app(Arc::default(), Some(HealthStatus::Healthy))
        .oneshot(get("/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"][0]["name"], "database");
}

#[tokio::test]
async fn test_not_ready_when_a_dependency_is_down() {
    let response = app(
        Arc::default(),
        Some(HealthStatus::Unhealthy("connection refused".to_string())),
    )
    .oneshot(get("/ready"))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["checks"][0]["status"], "unhealthy");
    assert_eq!(body["checks"][0]["message"], "connection refused");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = app(Arc::default(), None)
        .oneshot(get("/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/v1/users"]["post"].is_object());
}
