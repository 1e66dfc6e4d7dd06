//! HTTP API
//!
//! The UI is a pure consumer: it reads the conversation snapshot, posts user
//! actions, and re-renders from the event stream.

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::conversation::ConversationController;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ConversationController>,
}

impl AppState {
    pub fn new(controller: Arc<ConversationController>) -> Self {
        Self { controller }
    }
}
