//! Error handling for the gateway
//!
//! This module defines the crate-level error type and result alias.

use crate::core::generation::GenerationError;
use crate::core::upload::UploadError;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image generation errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Artifact upload errors
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            GatewayError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            GatewayError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            GatewayError::HttpClient(_)
            | GatewayError::Generation(_)
            | GatewayError::Upload(_) => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                self.to_string(),
            ),
            GatewayError::Serialization(_) | GatewayError::Io(_) | GatewayError::Internal(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }))
    }
}

/// Helper functions for creating specific errors
impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
