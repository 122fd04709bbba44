//! Upload session state and Slack wire types

use crate::core::generation::Artifact;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Per-artifact delivery state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    /// A slot has been reserved with the storage service
    Requested,
    /// The raw bytes were pushed to the upload target
    BytesSent,
    /// The batch finalize associated the artifact with the destination
    Completed,
    /// The artifact failed in some phase
    Failed(String),
}

/// State carried for one artifact across the three upload phases
///
/// Owned exclusively by the pipeline for the duration of one job and
/// discarded once the job's terminal notification is sent.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub name: String,
    pub bytes: Bytes,
    pub file_id: Option<String>,
    pub upload_url: Option<String>,
    pub phase: UploadPhase,
}

impl UploadSession {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            name: artifact.name,
            bytes: artifact.bytes,
            file_id: None,
            upload_url: None,
            phase: UploadPhase::Requested,
        }
    }
}

/// Reservation returned by `files.getUploadURLExternal`
#[derive(Debug, Clone)]
pub struct ReservedUpload {
    pub upload_url: String,
    pub file_id: String,
}

/// Response body of `files.getUploadURLExternal`
#[derive(Debug, Deserialize)]
pub struct GetUploadUrlResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
}

/// One entry of the finalize request
#[derive(Debug, Clone, Serialize)]
pub struct FileHandle {
    pub id: String,
    pub title: String,
}

/// Request body of `files.completeUploadExternal`
#[derive(Debug, Serialize)]
pub struct CompleteUploadRequest {
    pub files: Vec<FileHandle>,
    pub channel_id: String,
}

/// Response body of `files.completeUploadExternal`
#[derive(Debug, Deserialize)]
pub struct CompleteUploadResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub files: Vec<CompletedFile>,
}

/// One finalized file with its public reference
#[derive(Debug, Deserialize)]
pub struct CompletedFile {
    pub id: String,
    #[serde(default)]
    pub permalink: Option<String>,
}
