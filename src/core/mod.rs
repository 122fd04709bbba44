//! Core pipeline: command parsing, generation, artifact upload and job
//! dispatch. Data flows strictly forward: command text to parsed request,
//! request to artifacts, artifacts to public references, references to the
//! terminal notification.

pub mod command;
pub mod generation;
pub mod job;
pub mod upload;
