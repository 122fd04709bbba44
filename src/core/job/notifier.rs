//! Terminal notification delivery
//!
//! One best-effort POST per job. The callback URL is single-use and
//! short-lived, so a failed delivery is logged and never retried.

use super::types::TerminalMessage;
use std::time::Duration;
use tracing::{debug, warn};

/// Posts terminal messages to caller-supplied callback URLs
#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Deliver the terminal message, best-effort
    pub async fn notify(&self, response_url: &str, message: &TerminalMessage) {
        let result = self
            .client
            .post(response_url)
            .timeout(Duration::from_secs(10))
            .json(&message.to_payload())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!("terminal notification delivered");
            }
            Ok(response) => {
                warn!(status = %response.status(), "terminal notification rejected");
            }
            Err(err) => {
                warn!(error = %err, "terminal notification failed");
            }
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
