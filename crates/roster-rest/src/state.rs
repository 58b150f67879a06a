//! Application state for Axum handlers.

use roster_core::HealthCheck;
use roster_service::RegistrationService;
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub registration_service: Arc<dyn RegistrationService>,
    pub health_checks: Arc<Vec<Arc<dyn HealthCheck>>>,
}

impl AppState {
    /// Creates a new application state with no readiness checks.
    pub fn new(registration_service: Arc<dyn RegistrationService>) -> Self {
        Self {
            registration_service,
            health_checks: Arc::new(Vec::new()),
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn RegistrationService>,
    {
        Self::new(module.resolve())
    }

    /// Adds a dependency probe consulted by `/ready`.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        Arc::make_mut(&mut self.health_checks).push(check);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("health_checks", &self.health_checks.len())
            .finish_non_exhaustive()
    }
}
