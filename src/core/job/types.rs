//! Job lifecycle payloads

use serde::{Deserialize, Serialize};

/// One accepted command with its routing metadata
///
/// Immutable for the lifetime of the job.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommand {
    /// Unparsed slash-command text
    pub text: String,
    /// Destination channel for the generated images
    pub channel_id: String,
    /// One-shot callback URL for the terminal message
    pub response_url: String,
}

/// Immediate acknowledgement returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Acknowledgement {
    pub response_type: String,
    pub text: String,
}

impl Acknowledgement {
    pub fn processing() -> Self {
        Self {
            response_type: "ephemeral".to_string(),
            text: "Generating your images, this can take a little while...".to_string(),
        }
    }
}

/// Terminal outcome of one job, delivered exactly once to the callback URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalMessage {
    /// Public references to the delivered artifacts
    Success { references: Vec<String> },
    /// Human-readable failure reason
    Failure { reason: String },
}

impl TerminalMessage {
    pub fn success(references: Vec<String>) -> Self {
        Self::Success { references }
    }

    pub fn failure<S: Into<String>>(reason: S) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Callback JSON body: channel-visible image references on success,
    /// requester-only failure text otherwise.
    pub fn to_payload(&self) -> serde_json::Value {
        match self {
            Self::Success { references } => serde_json::json!({
                "response_type": "in_channel",
                "image_urls": references,
            }),
            Self::Failure { reason } => serde_json::json!({
                "response_type": "ephemeral",
                "text": reason,
            }),
        }
    }
}
