//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::config("Configuration is required"))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with configuration loaded from the environment
pub async fn run_server() -> Result<()> {
    info!("Starting slash-command image gateway");

    let config = Config::from_env()?;

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}:{}",
        config.server.host, config.server.port
    );
    info!("API Endpoints:");
    info!("   GET  /health        - Health check");
    info!("   POST /slack/command - Slash command intake");

    server.start().await
}
