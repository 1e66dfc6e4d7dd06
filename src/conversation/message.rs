//! Conversation data model

use crate::rules::{Action, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// Like/dislike signal on a bot message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Up,
    Down,
}

impl Feedback {
    pub fn as_str(self) -> &'static str {
        match self {
            Feedback::Up => "up",
            Feedback::Down => "down",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Feedback::Up),
            "down" => Ok(Feedback::Down),
            other => Err(format!("Unknown feedback label: {other}")),
        }
    }
}

/// One entry in a conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Correlates feedback with this message on the remote side
    pub id: String,
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Action>,
    pub feedback: Option<Feedback>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(sender: Sender, text: String, buttons: Vec<Action>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text,
            buttons,
            feedback: None,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), Vec::new())
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into(), Vec::new())
    }

    /// Bot message carrying a canned response and its buttons
    pub fn from_response(response: &Response) -> Self {
        Self::new(Sender::Bot, response.text.clone(), response.buttons.clone())
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

/// Ordered message history plus the in-flight flag
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub pending: bool,
}

impl Conversation {
    /// Fresh conversation opening with `greeting` from the bot
    pub fn seeded(greeting: &Response) -> Self {
        Self {
            messages: vec![Message::from_response(greeting)],
            pending: false,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub(super) fn find_mut(&mut self, id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Most recent message
    #[allow(dead_code)] // API completeness
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// State-change notifications published by the controller
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// A message was appended
    Message { message: Message },
    /// The send pipeline started or finished
    Pending { pending: bool },
    /// Feedback was accepted remotely and applied
    Feedback {
        message_id: String,
        feedback: Feedback,
    },
    /// The conversation was replaced by a fresh one
    Reset { conversation: Conversation },
}

impl ConversationEvent {
    /// Event name used on the SSE wire
    pub fn name(&self) -> &'static str {
        match self {
            ConversationEvent::Message { .. } => "message",
            ConversationEvent::Pending { .. } => "pending",
            ConversationEvent::Feedback { .. } => "feedback",
            ConversationEvent::Reset { .. } => "reset",
        }
    }
}
