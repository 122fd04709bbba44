//! Job lifecycle: dispatch, background continuation and terminal notification

pub mod dispatcher;
pub mod notifier;
pub mod types;

#[cfg(test)]
mod tests;

pub use dispatcher::JobDispatcher;
pub use notifier::Notifier;
pub use types::{Acknowledgement, RawCommand, TerminalMessage};
