//! Replicate generation client
//!
//! Thin shim over the external prediction API: one synchronous-style call
//! (`Prefer: wait`) followed by a download of each output URL. The client
//! imposes no timeout of its own; the spawned job is the unit of
//! cancellation granularity.

use super::types::{Artifact, PredictionInput, PredictionRequest, PredictionResponse};
use super::GenerationError;
use crate::config::ReplicateConfig;
use crate::core::command::SlashRequest;
use async_trait::async_trait;
use tracing::{debug, info};

/// Seam for the image generation backend
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate up to `request.num_outputs` artifacts for the given prompt
    ///
    /// Fewer artifacts than requested is accepted; zero is an error.
    async fn generate(
        &self,
        prompt: &str,
        request: &SlashRequest,
    ) -> Result<Vec<Artifact>, GenerationError>;
}

/// Client for the Replicate predictions API
#[derive(Debug, Clone)]
pub struct ReplicateClient {
    client: reqwest::Client,
    config: ReplicateConfig,
}

impl ReplicateClient {
    pub fn new(config: ReplicateConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn build_request(&self, prompt: &str, request: &SlashRequest) -> PredictionRequest {
        PredictionRequest {
            version: self.config.model_version.clone(),
            input: PredictionInput {
                prompt: prompt.to_string(),
                model: "dev".to_string(),
                go_fast: false,
                lora_scale: request.style_scale,
                extra_lora_scale: request.style_scale,
                megapixels: "1".to_string(),
                num_outputs: request.num_outputs.count(),
                aspect_ratio: request.aspect_ratio.as_str().to_string(),
                output_format: "png".to_string(),
                guidance_scale: 3,
                output_quality: 80,
                prompt_strength: 0.8,
                num_inference_steps: request.inference_steps,
                disable_safety_checker: true,
            },
        }
    }

    /// Download one output URL into an artifact
    async fn fetch_artifact(&self, url: &str, index: usize) -> Result<Artifact, GenerationError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::Service(format!(
                "artifact download returned status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Artifact {
            name: format!("image-{}.png", index + 1),
            bytes,
        })
    }
}

#[async_trait]
impl ImageGenerator for ReplicateClient {
    async fn generate(
        &self,
        prompt: &str,
        request: &SlashRequest,
    ) -> Result<Vec<Artifact>, GenerationError> {
        let body = self.build_request(prompt, request);
        let url = format!("{}/v1/predictions", self.config.api_base);

        debug!(
            num_outputs = request.num_outputs.count(),
            aspect_ratio = request.aspect_ratio.as_str(),
            "creating prediction"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::Service(format!(
                "prediction request returned status {}",
                response.status()
            )));
        }

        let prediction: PredictionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Service(format!("malformed prediction body: {}", e)))?;

        if let Some(error) = prediction.error {
            return Err(GenerationError::Service(error));
        }

        // A `Prefer: wait` response can still come back mid-flight or
        // failed without an error field; only a succeeded prediction has
        // trustworthy output.
        if prediction.status != "succeeded" {
            return Err(GenerationError::Service(format!(
                "prediction finished with status {}",
                prediction.status
            )));
        }

        let outputs = prediction.output.unwrap_or_default();
        if outputs.is_empty() {
            return Err(GenerationError::Empty);
        }

        // Take the first num_outputs URLs; the service occasionally returns
        // fewer than requested, which is accepted as-is.
        let wanted = request.num_outputs.count() as usize;
        let mut artifacts = Vec::with_capacity(wanted.min(outputs.len()));
        for (index, output_url) in outputs.iter().take(wanted).enumerate() {
            artifacts.push(self.fetch_artifact(output_url, index).await?);
        }

        info!(count = artifacts.len(), "prediction complete");
        Ok(artifacts)
    }
}
