//! Three-phase upload pipeline
//!
//! Drives Reserve, Transfer and Finalize for a batch of artifacts against
//! the Slack upload protocol. Batch semantics are all-or-nothing: any
//! reserve or transfer failure aborts the whole batch and finalize is never
//! attempted for the artifacts that did succeed. The caller's only recourse
//! on failure is to re-run the command.

use super::slack::SlackFilesClient;
use super::types::{FileHandle, UploadPhase, UploadSession};
use super::UploadError;
use crate::core::generation::Artifact;
use futures::future::join_all;
use tracing::{info, warn};

/// Upload pipeline for one or more artifacts
#[derive(Debug, Clone)]
pub struct UploadPipeline {
    client: SlackFilesClient,
}

impl UploadPipeline {
    pub fn new(client: SlackFilesClient) -> Self {
        Self { client }
    }

    /// Deliver all artifacts to the destination channel
    ///
    /// Returns one public reference per artifact, in order. An empty batch
    /// is a caller error.
    pub async fn deliver(
        &self,
        artifacts: Vec<Artifact>,
        channel_id: &str,
    ) -> Result<Vec<String>, UploadError> {
        if artifacts.is_empty() {
            return Err(UploadError::EmptyBatch);
        }

        let mut sessions: Vec<UploadSession> =
            artifacts.into_iter().map(UploadSession::new).collect();

        self.reserve_all(&mut sessions).await?;
        self.transfer_all(&mut sessions).await?;
        self.finalize_batch(&mut sessions, channel_id).await
    }

    /// Phase 1: reserve an upload slot per artifact; the first failure
    /// aborts the batch immediately.
    async fn reserve_all(&self, sessions: &mut [UploadSession]) -> Result<(), UploadError> {
        for session in sessions.iter_mut() {
            match self.client.reserve(&session.name, session.bytes.len()).await {
                Ok(reserved) => {
                    session.upload_url = Some(reserved.upload_url);
                    session.file_id = Some(reserved.file_id);
                    session.phase = UploadPhase::Requested;
                }
                Err(err) => {
                    session.phase = UploadPhase::Failed(err.to_string());
                    warn!(name = %session.name, error = %err, "reservation failed, aborting batch");
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Phase 2: push bytes for every reserved artifact, concurrently. Every
    /// transfer is attempted before the batch verdict; any failure aborts
    /// the batch.
    async fn transfer_all(&self, sessions: &mut [UploadSession]) -> Result<(), UploadError> {
        let transfers = sessions.iter().map(|session| async {
            let Some(upload_url) = session.upload_url.as_deref() else {
                // cannot happen after a successful reserve pass
                return Err(UploadError::Transfer {
                    name: session.name.clone(),
                    reason: "missing upload target".to_string(),
                });
            };
            self.client
                .transfer(upload_url, &session.name, session.bytes.clone())
                .await
        });

        let results = join_all(transfers).await;

        let mut first_failure: Option<UploadError> = None;
        for (session, result) in sessions.iter_mut().zip(results) {
            match result {
                Ok(()) => session.phase = UploadPhase::BytesSent,
                Err(err) => {
                    session.phase = UploadPhase::Failed(err.to_string());
                    warn!(name = %session.name, error = %err, "transfer failed");
                    first_failure.get_or_insert(err);
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Phase 3: one batched finalize across all artifacts
    async fn finalize_batch(
        &self,
        sessions: &mut [UploadSession],
        channel_id: &str,
    ) -> Result<Vec<String>, UploadError> {
        let files: Vec<FileHandle> = sessions
            .iter()
            .map(|session| FileHandle {
                id: session.file_id.clone().unwrap_or_default(),
                title: session.name.clone(),
            })
            .collect();

        let references = self.client.finalize(files, channel_id).await?;

        for session in sessions.iter_mut() {
            session.phase = UploadPhase::Completed;
        }

        info!(
            count = references.len(),
            channel_id, "artifact batch delivered"
        );
        Ok(references)
    }
}
