//! Slash-command parsing
//!
//! Pure text-to-request translation: no I/O happens in this module.

pub mod options;
pub mod parser;
pub mod prompt;


pub use options::{AspectRatio, DetailLevel, OutputCount, SlashRequest};
pub use parser::parse;
pub use prompt::build_prompt;
