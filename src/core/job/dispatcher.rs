//! Job dispatcher
//!
//! Owns the request lifecycle: returns an immediate acknowledgement, spawns
//! one task per accepted command, and guarantees exactly one terminal
//! notification per job. Jobs are fully independent; there is no shared
//! mutable state, no admission control and no deadline.

use super::notifier::Notifier;
use super::types::{Acknowledgement, RawCommand, TerminalMessage};
use crate::config::Config;
use crate::core::command::{build_prompt, parse};
use crate::core::generation::{ImageGenerator, ReplicateClient};
use crate::core::upload::{SlackFilesClient, UploadPipeline};
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Dispatches accepted commands onto background jobs
pub struct JobDispatcher {
    generator: Arc<dyn ImageGenerator>,
    pipeline: UploadPipeline,
    notifier: Notifier,
}

impl JobDispatcher {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        pipeline: UploadPipeline,
        notifier: Notifier,
    ) -> Self {
        Self {
            generator,
            pipeline,
            notifier,
        }
    }

    /// Wire the dispatcher against the real external collaborators
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ReplicateClient::new(config.replicate.clone())),
            UploadPipeline::new(SlackFilesClient::new(config.slack.clone())),
            Notifier::new(),
        )
    }

    /// Accept one command: spawn its job and acknowledge immediately
    ///
    /// Always succeeds; unusable option text is absorbed by parser defaults
    /// inside the job, never surfaced here.
    pub fn accept(self: &Arc<Self>, command: RawCommand) -> Acknowledgement {
        let job_id = Uuid::new_v4();
        let dispatcher = Arc::clone(self);

        tokio::spawn(async move {
            dispatcher.run_job(job_id, command).await;
        });

        Acknowledgement::processing()
    }

    /// Run one job to completion
    ///
    /// Every error is converted into a failure terminal message; the single
    /// exit path below is the only place that notifies, so each job notifies
    /// exactly once.
    pub(crate) async fn run_job(&self, job_id: Uuid, command: RawCommand) {
        info!(%job_id, channel_id = %command.channel_id, "job started");

        let message = match self.execute(&command).await {
            Ok(message) => message,
            Err(err) => {
                error!(%job_id, error = %err, "job failed");
                failure_message(&err)
            }
        };

        self.notifier.notify(&command.response_url, &message).await;
        info!(%job_id, "job finished");
    }

    /// The job continuation: parse, generate, deliver
    async fn execute(&self, command: &RawCommand) -> Result<TerminalMessage> {
        let request = parse(&command.text);
        let prompt = build_prompt(&request);

        let artifacts = self.generator.generate(&prompt, &request).await?;
        let references = self
            .pipeline
            .deliver(artifacts, &command.channel_id)
            .await?;

        Ok(TerminalMessage::success(references))
    }
}

/// Map a job error onto the caller-facing failure text
fn failure_message(err: &GatewayError) -> TerminalMessage {
    match err {
        GatewayError::Generation(_) => {
            TerminalMessage::failure("Failed to generate the requested images.")
        }
        GatewayError::Upload(upload_err) => TerminalMessage::failure(format!(
            "Failed to deliver the generated images: {}",
            upload_err
        )),
        _ => TerminalMessage::failure("Something went wrong while processing the command."),
    }
}
