//! Wire types for the generation service

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One generated output as raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// Upload filename, e.g. `image-1.png`
    pub name: String,
    /// Raw PNG bytes
    pub bytes: Bytes,
}

/// Prediction creation request body
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    /// Pinned model version hash
    pub version: String,
    /// Model input payload
    pub input: PredictionInput,
}

/// Model input payload for the fine-tuned image model
#[derive(Debug, Clone, Serialize)]
pub struct PredictionInput {
    pub prompt: String,
    pub model: String,
    pub go_fast: bool,
    pub lora_scale: f64,
    pub extra_lora_scale: f64,
    pub megapixels: String,
    pub num_outputs: u32,
    pub aspect_ratio: String,
    pub output_format: String,
    pub guidance_scale: u32,
    pub output_quality: u32,
    pub prompt_strength: f64,
    pub num_inference_steps: u32,
    pub disable_safety_checker: bool,
}

/// Prediction response body
///
/// Only the fields the client reads; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub status: String,
    #[serde(default)]
    pub output: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}
