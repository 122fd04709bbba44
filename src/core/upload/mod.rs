//! Artifact delivery over the external storage upload protocol

pub mod pipeline;
pub mod slack;
pub mod types;


pub use pipeline::UploadPipeline;
pub use slack::SlackFilesClient;
pub use types::{ReservedUpload, UploadPhase, UploadSession};

use thiserror::Error;

/// Errors from the upload pipeline
///
/// Each variant carries the failing phase's context; the whole batch fails
/// with the first error encountered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Phase 1 failure: no upload slot could be reserved
    #[error("could not reserve upload slot for {name}: {reason}")]
    Reserve { name: String, reason: String },

    /// Phase 2 failure: the byte push was rejected
    #[error("byte transfer failed for {name}: {reason}")]
    Transfer { name: String, reason: String },

    /// Phase 3 failure: the batch association was rejected
    #[error("upload finalization failed: {reason}")]
    Finalize { reason: String },

    /// Caller error: nothing to deliver
    #[error("no artifacts to deliver")]
    EmptyBatch,
}
