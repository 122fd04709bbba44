//! Image generation client

pub mod client;
pub mod types;


pub use client::{ImageGenerator, ReplicateClient};
pub use types::{Artifact, PredictionInput, PredictionRequest, PredictionResponse};

use thiserror::Error;

/// Errors from the generation service boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The service answered but produced no artifacts
    #[error("the service produced no artifacts")]
    Empty,

    /// The service reported a failure
    #[error("generation service error: {0}")]
    Service(String),

    /// Transport-level failure
    #[error("generation network error: {0}")]
    Network(String),
}
