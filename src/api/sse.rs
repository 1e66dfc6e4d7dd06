//! Server-Sent Events support

use crate::conversation::{Conversation, ConversationEvent};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Snapshot first, then every controller event
pub fn sse_stream(
    snapshot: Conversation,
    events_rx: broadcast::Receiver<ConversationEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(init_event(&snapshot)) });

    let updates = BroadcastStream::new(events_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(conversation_event_to_axum(&event))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(updates)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn init_event(snapshot: &Conversation) -> Event {
    let data = json!({
        "type": "init",
        "conversation": snapshot,
    });
    Event::default().event("init").data(data.to_string())
}

fn conversation_event_to_axum(event: &ConversationEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to serialize conversation event");
        json!({ "type": "error", "message": e.to_string() }).to_string()
    });
    Event::default().event(event.name()).data(data)
}
