//! Conversation state and the send pipeline
//!
//! A [`ConversationController`] owns the only mutable [`Conversation`] for a
//! chat session. UI layers read snapshots through `state()` and re-render on
//! the events published by `subscribe()`.

mod controller;
mod feedback;
mod message;

#[cfg(test)]
pub mod testing;

#[allow(unused_imports)] // Public API re-exports
pub use controller::{ControllerError, ConversationController, SendOutcome, FALLBACK_REPLY};
#[allow(unused_imports)] // Public API re-exports
pub use feedback::FeedbackRecorder;
#[allow(unused_imports)] // Public API re-exports
pub use message::{Conversation, ConversationEvent, Feedback, Message, Sender};
