//! # Roster REST
//!
//! HTTP surface of the registration service, built on Axum.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/users` registers a user
//! - `GET /health`, `GET /live`, `GET /ready` report process and dependency health
//! - `GET /swagger-ui` serves the OpenAPI documentation

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
