//! State and rules of the chat widget, kept apart from any window so it can
//! be driven by fakes.
//!
//! A submission is split in two halves around the network call:
//! `begin_submission` runs synchronously when the user sends, and
//! `finish_submission` runs when the reply (or error) arrives. The UI awaits
//! the request in between on its own executor; `submit` glues the halves
//! together for callers that can simply await.

use crate::capability::chat::{ChatCapability, Health, RequestError};
use crate::capability::storage::StorageCapability;
use crate::domain::char_count::{self, CharCount};
use crate::domain::history::ConversationHistory;
use crate::domain::message::{Message, Role};
use crate::domain::status::ConnectionStatus;
use crate::domain::toast::{Toast, ToastKind, ToastTicket, Toaster};
use crate::nice_display::NiceDisplay;
use crate::render::{self, RenderedMessage};
use std::sync::Arc;
use std::time::Duration;

pub const HEALTH_RETRY_INTERVAL: Duration = Duration::from_millis(2000);

pub const WELCOME_TEXT: &str = "Hello! I'm the Revnix assistant. Ask me anything about Revnix, our services or our team.";
pub const APOLOGY_TEXT: &str = "Sorry, I encountered an error. Please try again.";

pub const QUICK_QUESTIONS: [&str; 4] = [
    "What services does Revnix offer?",
    "How can I contact Revnix?",
    "What technologies does Revnix work with?",
    "Where is Revnix located?",
];

const CHAT_FAILED_TOAST: &str = "Failed to get response. Please try again.";
const HEALTH_FAILED_TOAST: &str = "Unable to connect to the server. Please refresh the page.";
const CLEARED_TOAST: &str = "Conversation cleared!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthOutcome {
    Ready,
    RetryAfter(Duration),
    /// Polling stops for good.
    Failed(ToastTicket),
}

pub struct ChatController<W> {
    worker: Arc<W>,
    welcome: Message,
    messages: Vec<Message>,
    history: ConversationHistory,
    input: String,
    busy: bool,
    typing: bool,
    status: ConnectionStatus,
    toaster: Toaster,
    clear_pending: bool,
}

impl<W: StorageCapability> ChatController<W> {
    /// Loads the stored history and replays its newest exchanges.
    pub fn new(worker: Arc<W>) -> Self {
        let history = ConversationHistory::load(worker.as_ref());

        let messages = history
            .recent()
            .iter()
            .flat_map(|exchange| exchange.to_messages())
            .collect();

        Self {
            worker,
            welcome: Message::new(Role::Bot, WELCOME_TEXT),
            messages,
            history,
            input: String::new(),
            busy: false,
            typing: false,
            status: ConnectionStatus::connecting(),
            toaster: Toaster::default(),
            clear_pending: false,
        }
    }

    pub fn worker(&self) -> Arc<W> {
        self.worker.clone()
    }

    pub fn set_input(&mut self, input: String) {
        self.input = char_count::clamp(input);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn char_count(&self) -> CharCount {
        CharCount::of(&self.input)
    }

    /// Takes the current input as a question. Returns `None`, changing
    /// nothing, when the trimmed input is empty or a request is in flight.
    pub fn begin_submission(&mut self) -> Option<String> {
        let question = self.input.trim().to_string();

        if question.is_empty() || self.busy {
            return None;
        }

        self.busy = true;
        self.messages.push(Message::new(Role::User, question.as_str()));
        self.input.clear();
        self.typing = true;

        tracing::debug!("Sending question ({} chars)", question.chars().count());

        Some(question)
    }

    /// Applies the outcome of a request started by `begin_submission`. The
    /// busy flag is always released, whatever the outcome.
    pub fn finish_submission(
        &mut self,
        question: String,
        result: Result<String, RequestError>,
    ) -> Option<ToastTicket> {
        self.typing = false;

        let ticket = match result {
            Ok(answer) => {
                self.messages.push(Message::new(Role::Bot, answer.as_str()));
                self.history.append(self.worker.as_ref(), question, answer);
                None
            }
            Err(err) => {
                tracing::error!("Chat request failed: {}", err.message());
                self.messages.push(Message::new(Role::Bot, APOLOGY_TEXT));
                Some(self.toaster.show(CHAT_FAILED_TOAST, ToastKind::Error))
            }
        };

        self.busy = false;
        ticket
    }

    pub fn health_checked(&mut self, result: Result<Health, RequestError>) -> HealthOutcome {
        match result {
            Ok(health) if health.is_ready() => {
                tracing::info!("Chat backend is ready");
                self.status = ConnectionStatus::ready();
                HealthOutcome::Ready
            }
            Ok(health) => {
                tracing::debug!(
                    "Chat backend not ready yet (status={:?}, agent_ready={:?})",
                    health.status,
                    health.agent_ready
                );
                self.status = ConnectionStatus::initializing();
                HealthOutcome::RetryAfter(HEALTH_RETRY_INTERVAL)
            }
            Err(err) => {
                // TODO: retry with backoff after a transport failure instead of
                // stopping until restart.
                tracing::error!("Health check failed: {}", err.message());
                self.status = ConnectionStatus::connection_error();
                HealthOutcome::Failed(self.toaster.show(HEALTH_FAILED_TOAST, ToastKind::Error))
            }
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastTicket {
        self.toaster.show(message, kind)
    }

    pub fn toast_expired(&mut self, ticket: ToastTicket) {
        self.toaster.expire(ticket);
    }

    pub fn request_clear(&mut self) {
        self.clear_pending = true;
    }

    pub fn cancel_clear(&mut self) {
        self.clear_pending = false;
    }

    /// Does nothing unless `request_clear` came first.
    pub fn confirm_clear(&mut self) -> Option<ToastTicket> {
        if !self.clear_pending {
            return None;
        }

        self.clear_pending = false;
        self.messages.clear();
        self.history.clear(self.worker.as_ref());

        tracing::info!("Conversation cleared");

        Some(self.toaster.show(CLEARED_TOAST, ToastKind::Success))
    }

    pub fn rendered(&self) -> Vec<RenderedMessage> {
        render::render_messages(&self.welcome, &self.messages)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toaster.current()
    }

    pub fn clear_pending(&self) -> bool {
        self.clear_pending
    }
}

impl<W: ChatCapability + StorageCapability> ChatController<W> {
    /// Runs a whole submission. Returns `false` when nothing was sent.
    pub async fn submit(&mut self) -> bool {
        let Some(question) = self.begin_submission() else {
            return false;
        };

        let worker = self.worker.clone();
        let result = worker.ask(&question).await;
        self.finish_submission(question, result);

        true
    }

    pub async fn check_health(&mut self) -> HealthOutcome {
        let worker = self.worker.clone();
        let result = worker.check_health().await;
        self.health_checked(result)
    }
}
