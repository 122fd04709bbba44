//! Slack external-upload API client
//!
//! Implements the client side of the three-call upload protocol:
//! `files.getUploadURLExternal`, a raw byte push to the returned target,
//! and `files.completeUploadExternal`.

use super::types::{
    CompleteUploadRequest, CompleteUploadResponse, FileHandle, GetUploadUrlResponse,
    ReservedUpload,
};
use super::UploadError;
use crate::config::SlackConfig;
use bytes::Bytes;
use tracing::debug;

/// Client for the Slack file upload endpoints
#[derive(Debug, Clone)]
pub struct SlackFilesClient {
    client: reqwest::Client,
    config: SlackConfig,
}

impl SlackFilesClient {
    pub fn new(config: SlackConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Reserve an upload slot for one file
    pub async fn reserve(
        &self,
        filename: &str,
        length: usize,
    ) -> Result<ReservedUpload, UploadError> {
        let reserve_err = |reason: String| UploadError::Reserve {
            name: filename.to_string(),
            reason,
        };

        let url = format!("{}/api/files.getUploadURLExternal", self.config.api_base);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.bot_token)
            .query(&[("filename", filename), ("length", &length.to_string())])
            .send()
            .await
            .map_err(|e| reserve_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(reserve_err(format!("status {}", response.status())));
        }

        let body: GetUploadUrlResponse = response
            .json()
            .await
            .map_err(|e| reserve_err(format!("malformed response: {}", e)))?;

        if !body.ok {
            return Err(reserve_err(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        match (body.upload_url, body.file_id) {
            (Some(upload_url), Some(file_id)) => {
                debug!(filename, file_id, "upload slot reserved");
                Ok(ReservedUpload {
                    upload_url,
                    file_id,
                })
            }
            _ => Err(reserve_err(
                "response missing upload_url or file_id".to_string(),
            )),
        }
    }

    /// Push the raw bytes of one file to its reserved upload target
    pub async fn transfer(
        &self,
        upload_url: &str,
        filename: &str,
        bytes: Bytes,
    ) -> Result<(), UploadError> {
        let transfer_err = |reason: String| UploadError::Transfer {
            name: filename.to_string(),
            reason,
        };

        let response = self
            .client
            .post(upload_url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| transfer_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(transfer_err(format!("status {}", response.status())));
        }

        debug!(filename, "bytes transferred");
        Ok(())
    }

    /// Atomically associate all transferred files with the destination channel
    ///
    /// Returns one public reference per file, in request order.
    pub async fn finalize(
        &self,
        files: Vec<FileHandle>,
        channel_id: &str,
    ) -> Result<Vec<String>, UploadError> {
        let finalize_err = |reason: String| UploadError::Finalize { reason };

        let url = format!("{}/api/files.completeUploadExternal", self.config.api_base);
        let request = CompleteUploadRequest {
            files,
            channel_id: channel_id.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.bot_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| finalize_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(finalize_err(format!("status {}", response.status())));
        }

        let body: CompleteUploadResponse = response
            .json()
            .await
            .map_err(|e| finalize_err(format!("malformed response: {}", e)))?;

        if !body.ok {
            return Err(finalize_err(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(body
            .files
            .into_iter()
            .map(|file| file.permalink.unwrap_or(file.id))
            .collect())
    }
}
