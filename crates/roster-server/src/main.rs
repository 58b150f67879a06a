//! # Roster Server
//!
//! Loads configuration, initializes logging and serves the registration API
//! until interrupted.

use roster_config::ConfigLoader;
use roster_core::{telemetry::init_telemetry, RosterResult};
use roster_server::{
    app::Application,
    startup::{print_startup_info, shutdown_signal},
};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            // Logging is configured from this file, so there is no subscriber yet.
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config_loader).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Application error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config_loader: ConfigLoader) -> RosterResult<()> {
    let config = config_loader.get();
    init_telemetry(&config.observability.telemetry())?;

    info!("Starting Roster server...");
    info!("Environment: {}", config_loader.environment());

    let app = Application::build(config).await?;
    print_startup_info(config, app.local_addr()?);

    app.run_until_stopped(shutdown_signal()).await
}
