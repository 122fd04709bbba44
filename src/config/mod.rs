//! Configuration management for the gateway
//!
//! Configuration is built once at startup from the process environment and
//! shared read-only for the lifetime of the process. Nothing reads ambient
//! environment state after startup.

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_slack_api_base() -> String {
    "https://slack.com".to_string()
}

fn default_replicate_api_base() -> String {
    "https://api.replicate.com".to_string()
}

fn default_model_version() -> String {
    "a3409648730239101538d4cf79f2fdb0e068a5c7e6509ad86ab3fae09c4d6ef8".to_string()
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Slack Web API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot token used to authenticate file uploads
    pub bot_token: String,
    /// API base URL, overridable so tests can target a mock server
    #[serde(default = "default_slack_api_base")]
    pub api_base: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base: default_slack_api_base(),
        }
    }
}

/// Replicate generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicateConfig {
    /// API token for the generation service
    pub api_token: String,
    /// Pinned model version hash
    #[serde(default = "default_model_version")]
    pub model_version: String,
    /// API base URL, overridable so tests can target a mock server
    #[serde(default = "default_replicate_api_base")]
    pub api_base: String,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            model_version: default_model_version(),
            api_base: default_replicate_api_base(),
        }
    }
}

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Slack Web API settings
    #[serde(default)]
    pub slack: SlackConfig,
    /// Generation service settings
    #[serde(default)]
    pub replicate: ReplicateConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| default_host()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
        };

        let slack = SlackConfig {
            bot_token: env::var("SLACK_BOT_TOKEN").unwrap_or_default(),
            api_base: env::var("SLACK_API_BASE").unwrap_or_else(|_| default_slack_api_base()),
        };

        let replicate = ReplicateConfig {
            api_token: env::var("REPLICATE_API_TOKEN").unwrap_or_default(),
            model_version: env::var("REPLICATE_MODEL_VERSION")
                .unwrap_or_else(|_| default_model_version()),
            api_base: env::var("REPLICATE_API_BASE")
                .unwrap_or_else(|_| default_replicate_api_base()),
        };

        let config = Self {
            server,
            slack,
            replicate,
        };

        config.validate()?;

        debug!("Configuration loaded from environment");
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::config("Server port cannot be 0"));
        }
        if self.slack.bot_token.is_empty() {
            return Err(GatewayError::config("SLACK_BOT_TOKEN is not set"));
        }
        if self.replicate.api_token.is_empty() {
            return Err(GatewayError::config("REPLICATE_API_TOKEN is not set"));
        }
        if self.replicate.model_version.is_empty() {
            return Err(GatewayError::config("Model version cannot be empty"));
        }
        Ok(())
    }
}
