//! FX Signal Gateway API Server
//!
//! Serves the analysis, heartbeat and trade endpoints plus the demo UI.

use dotenvy::dotenv;
use fx_signal_gateway::config::ServerConfig;
use fx_signal_gateway::core::http::start_server;
use fx_signal_gateway::logging;
use fx_signal_gateway::services::GeminiProvider;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = ServerConfig::from_env();
    let env = fx_signal_gateway::config::get_environment();
    info!("Starting FX Signal Gateway API Server");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(model = %config.gemini.model, "Analysis provider: Gemini");
    if config.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set - analysis requests will be rejected");
    }

    let provider = Arc::new(GeminiProvider::new(config.gemini.clone())?);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config, provider).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
