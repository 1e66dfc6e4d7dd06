//! Conversation controller
//!
//! Each `send` moves Idle -> Sending -> Idle. Input is answered by the first
//! matching rule when there is one, otherwise by the remote answer service.
//! Remote failures become a fixed apology from the bot; `send` itself never
//! fails.
//!
//! `pending` is the single-flight guard: a send that starts while another is
//! in flight is rejected with [`SendOutcome::Busy`], and the flag is released
//! by a scoped guard on every exit path, including a dropped future.

use super::feedback::FeedbackRecorder;
use super::message::{Conversation, ConversationEvent, Feedback, Message};
use crate::remote::{FeedbackSink, QueryClient, RemoteError};
use crate::rules::{RuleEngine, RuleSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::broadcast;

/// Bot reply used when the remote service cannot answer
pub const FALLBACK_REPLY: &str = "Sorry 🙁🙁 there was an error. Please try again.";

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// How a `send` call was resolved
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input; nothing changed
    Ignored,
    /// Another send was in flight; nothing changed
    Busy,
    /// Answered by a configured rule
    Rule(Message),
    /// Answered by the remote service
    Remote(Message),
    /// Remote service failed; the fallback reply was appended
    Fallback(Message),
}

impl SendOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            SendOutcome::Ignored => "ignored",
            SendOutcome::Busy => "busy",
            SendOutcome::Rule(_) => "rule",
            SendOutcome::Remote(_) => "remote",
            SendOutcome::Fallback(_) => "fallback",
        }
    }

    /// The bot message appended by this send, if any
    pub fn reply(&self) -> Option<&Message> {
        match self {
            SendOutcome::Rule(m) | SendOutcome::Remote(m) | SendOutcome::Fallback(m) => Some(m),
            SendOutcome::Ignored | SendOutcome::Busy => None,
        }
    }
}

/// Errors from controller operations other than `send`
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("A message is still being answered")]
    Busy,
    #[error("Message not found: {0}")]
    UnknownMessage(String),
    #[error("Message {0} is not a bot reply")]
    NotBotMessage(String),
    #[error("Feedback was not accepted: {0}")]
    FeedbackRejected(#[from] RemoteError),
}

/// Owner of one chat session's conversation
pub struct ConversationController {
    engine: RuleEngine,
    query_client: Arc<dyn QueryClient>,
    recorder: FeedbackRecorder,
    conversation: Mutex<Conversation>,
    events_tx: broadcast::Sender<ConversationEvent>,
}

impl ConversationController {
    pub fn new(
        ruleset: Arc<RuleSet>,
        query_client: Arc<dyn QueryClient>,
        feedback_sink: Arc<dyn FeedbackSink>,
    ) -> Self {
        let engine = RuleEngine::new(ruleset);
        let conversation = Conversation::seeded(engine.ruleset().greeting());
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            engine,
            query_client,
            recorder: FeedbackRecorder::new(feedback_sink),
            conversation: Mutex::new(conversation),
            events_tx,
        }
    }

    /// Snapshot of the conversation
    pub fn state(&self) -> Conversation {
        self.lock().clone()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }

    /// Receive every state change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events_tx.subscribe()
    }

    /// Answer one piece of user input.
    ///
    /// Appends exactly two messages (user, then bot) unless the input is blank
    /// or another send is in flight, in which case nothing changes.
    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank input");
            return SendOutcome::Ignored;
        }

        let Some(_pending) = PendingGuard::begin(self, Message::user(text)) else {
            tracing::warn!("Rejecting send while a reply is pending");
            return SendOutcome::Busy;
        };

        if let Some(response) = self.engine.respond(text) {
            let reply = Message::from_response(response);
            self.append(reply.clone());
            return SendOutcome::Rule(reply);
        }

        let outcome = match self.query_client.query(text).await {
            Ok(answer) => SendOutcome::Remote(Message::bot(answer.answer)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kind = ?e.kind,
                    status = ?e.status,
                    "No remote answer, replying with fallback"
                );
                SendOutcome::Fallback(Message::bot(FALLBACK_REPLY))
            }
        };

        if let Some(reply) = outcome.reply() {
            self.append(reply.clone());
        }
        outcome
    }

    /// Start over with a freshly seeded conversation
    pub fn reset(&self) -> Result<Conversation, ControllerError> {
        let snapshot = {
            let mut conversation = self.lock();
            if conversation.pending {
                return Err(ControllerError::Busy);
            }
            *conversation = Conversation::seeded(self.engine.ruleset().greeting());
            conversation.clone()
        };

        tracing::info!("Conversation reset");
        self.publish(ConversationEvent::Reset {
            conversation: snapshot.clone(),
        });
        Ok(snapshot)
    }

    /// Validate that `message_id` names a bot message that can be rated
    pub fn feedback_target(&self, message_id: &str) -> Result<Message, ControllerError> {
        let conversation = self.lock();
        let message = conversation
            .find(message_id)
            .ok_or_else(|| ControllerError::UnknownMessage(message_id.to_string()))?;

        if !message.is_bot() {
            return Err(ControllerError::NotBotMessage(message_id.to_string()));
        }
        Ok(message.clone())
    }

    /// Record a like/dislike for a bot message.
    ///
    /// The message's `feedback` field only changes after the collaborator
    /// accepted the signal.
    pub async fn record_feedback(
        &self,
        message_id: &str,
        signal: Feedback,
    ) -> Result<(), ControllerError> {
        let target = self.feedback_target(message_id)?;
        self.recorder.record(signal, &target).await?;

        let applied = {
            let mut conversation = self.lock();
            match conversation.find_mut(message_id) {
                Some(message) => {
                    message.feedback = Some(signal);
                    true
                }
                None => false,
            }
        };

        if applied {
            self.publish(ConversationEvent::Feedback {
                message_id: message_id.to_string(),
                feedback: signal,
            });
        } else {
            tracing::debug!(message_id, "Rated message left the conversation before feedback was accepted");
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Conversation> {
        self.conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn append(&self, message: Message) {
        self.lock().messages.push(message.clone());
        self.publish(ConversationEvent::Message { message });
    }

    fn publish(&self, event: ConversationEvent) {
        // No subscribers is fine
        let _ = self.events_tx.send(event);
    }
}

/// Holds `pending = true` for the lifetime of one send
struct PendingGuard<'a> {
    controller: &'a ConversationController,
}

impl<'a> PendingGuard<'a> {
    /// Claim the pipeline and append the user message in one step.
    /// Returns `None` if a send is already in flight.
    fn begin(controller: &'a ConversationController, user_message: Message) -> Option<Self> {
        {
            let mut conversation = controller.lock();
            if conversation.pending {
                return None;
            }
            conversation.pending = true;
            conversation.messages.push(user_message.clone());
        }

        controller.publish(ConversationEvent::Pending { pending: true });
        controller.publish(ConversationEvent::Message {
            message: user_message,
        });
        Some(Self { controller })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.controller.lock().pending = false;
        self.controller
            .publish(ConversationEvent::Pending { pending: false });
    }
}
