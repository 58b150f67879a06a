//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{CheckResult, HealthResponse, ReadinessResponse};
use roster_core::{ErrorResponse, FieldError, Gender, InterestId, SkillId, UserId};
use roster_service::{InterestResponse, RegisterUserRequest, SkillResponse, UserResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "User registration with interest and skill linking",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::user_controller::register_user,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            InterestId,
            SkillId,
            Gender,
            ErrorResponse,
            FieldError,
            RegisterUserRequest,
            UserResponse,
            InterestResponse,
            SkillResponse,
            HealthResponse,
            CheckResult,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "users", description = "User registration"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
