//! Application assembly.

use crate::di::{build_registration_module, DatabaseResolver, RegistrationModule};
use roster_config::AppConfig;
use roster_core::{RosterError, RosterResult};
use roster_repository::{DatabaseHealthCheck, DatabasePool, DatabasePoolInterface};
use roster_rest::{create_router, AppState};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// A configured server, bound and ready to serve.
pub struct Application {
    listener: TcpListener,
    router: axum::Router,
    module: Arc<RegistrationModule>,
}

impl Application {
    /// Connects the database, applies migrations when enabled, and binds the
    /// listener.
    pub async fn build(config: &AppConfig) -> RosterResult<Self> {
        let pool = DatabasePool::connect(&config.database).await?;
        Self::with_pool(config, &pool).await
    }

    /// Builds the application around an already connected pool.
    pub async fn with_pool(config: &AppConfig, pool: &DatabasePool) -> RosterResult<Self> {
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let module = build_registration_module(pool);
        let state = AppState::from_module(module.as_ref())
            .with_health_check(Arc::new(DatabaseHealthCheck::new(module.database_pool())));
        let router = create_router(state, &config.server);

        let rest_addr = config.server.rest_addr();
        let listener = TcpListener::bind(&rest_addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind {}: {}", rest_addr, e)))?;

        Ok(Self {
            listener,
            router,
            module,
        })
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> RosterResult<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| RosterError::Internal(format!("Listener has no address: {}", e)))
    }

    /// Returns a handle to the router, for in-process requests.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        self.router.clone()
    }

    /// Serves until `shutdown` resolves, then closes the pool.
    pub async fn run_until_stopped<F>(self, shutdown: F) -> RosterResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Serving REST API on http://{}", self.local_addr()?);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RosterError::Internal(format!("REST server error: {}", e)))?;

        self.module.database_pool().close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("local_addr", &self.listener.local_addr().ok())
            .finish_non_exhaustive()
    }
}
