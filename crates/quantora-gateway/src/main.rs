//! Quantora Gateway Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p quantora-gateway
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use quantora_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Tracing comes up before the config so config errors get logged
    let env = tracing_environment(|key| std::env::var(key).ok());

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed to start");
        std::process::exit(1);
    }
}

/// Environment used to pick the tracing preset. Unknown values fall back to
/// the default; config loading reports them as errors later.
fn tracing_environment<F>(lookup: F) -> Environment
where
    F: Fn(&str) -> Option<String>,
{
    lookup("APP_ENV")
        .and_then(|value| Environment::parse(&value))
        .unwrap_or_default()
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Quantora Gateway Server...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.gateway.port,
        "Configuration loaded"
    );

    // Run the gateway server
    quantora_gateway::run(config).await.map_err(|e| {
        error!(code = e.error_code(), error = %e, "Gateway stopped with error");
        e
    })?;

    info!("Gateway shut down");
    Ok(())
}
