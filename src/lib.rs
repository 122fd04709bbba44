//! # slashgen
//!
//! Gateway that turns a Slack slash command into generated images.
//!
//! A command like `/imagine a red car --ar 16:9 --num_outputs 1` is parsed
//! into a typed request, acknowledged immediately, and completed in the
//! background: the prompt goes to the generation service, the resulting
//! artifacts are delivered to the channel through Slack's external upload
//! protocol, and the requester gets exactly one terminal message at the
//! callback URL.
//!
//! ## Running the gateway
//!
//! ```rust,no_run
//! use slashgen::{server, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = server::HttpServer::new(&config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

// Re-export the core pipeline surface
pub use crate::core::command::{parse, AspectRatio, OutputCount, SlashRequest};
pub use crate::core::generation::{Artifact, GenerationError, ImageGenerator, ReplicateClient};
pub use crate::core::job::{Acknowledgement, JobDispatcher, Notifier, RawCommand, TerminalMessage};
pub use crate::core::upload::{SlackFilesClient, UploadError, UploadPipeline};
