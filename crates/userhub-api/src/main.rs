//! userhub API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p userhub-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use tracing::{error, info};
use userhub_common::{try_init_tracing_with_config, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::from_log_config(&config.log)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        "Configuration loaded"
    );

    userhub_api::run(config).await?;

    Ok(())
}
