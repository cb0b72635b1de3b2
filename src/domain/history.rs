//! Bounded question/answer log, persisted as one JSON string under a fixed
//! storage key.

use crate::capability::storage::{StorageCapability, StorageError};
use crate::domain::message::{Message, Role};
use crate::nice_display::NiceDisplay;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "revnix_conversation";

/// Oldest exchanges are dropped past this many.
pub const MAX_EXCHANGES: usize = 50;

/// How many of the newest exchanges are shown again after a restart.
pub const REPLAY_EXCHANGES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Exchange {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn to_messages(&self) -> [Message; 2] {
        [
            Message::at(Role::User, self.question.as_str(), self.timestamp),
            Message::at(Role::Bot, self.answer.as_str(), self.timestamp),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationHistory {
    exchanges: Vec<Exchange>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the stored history. A missing key or an unreadable blob both
    /// give an empty history.
    pub fn load<S: StorageCapability>(storage: &S) -> Self {
        let json = match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Self::new(),
            Err(err) => {
                tracing::warn!("Could not load conversation history: {}", err.message());
                return Self::new();
            }
        };

        match Self::from_json(&json) {
            Ok(history) => {
                tracing::info!("Loaded {} conversation history entries", history.len());
                history
            }
            Err(err) => {
                tracing::warn!("Could not load conversation history: {}", err.message());
                Self::new()
            }
        }
    }

    /// Entries without a question or answer are skipped rather than failing
    /// the whole list.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let values: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|err| StorageError::Deserialize(err.message()))?;

        let exchanges = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Exchange>(value) {
                Ok(exchange) => Some(exchange),
                Err(err) => {
                    tracing::warn!("Dropping malformed history entry: {}", err);
                    None
                }
            })
            .collect();

        let mut history = Self { exchanges };
        history.truncate();
        Ok(history)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(&self.exchanges).map_err(|err| StorageError::Serialize(err.message()))
    }

    pub fn push(&mut self, exchange: Exchange) {
        self.exchanges.push(exchange);
        self.truncate();
    }

    /// Records an exchange and writes the whole list back. Write failures
    /// are logged only.
    pub fn append<S: StorageCapability>(
        &mut self,
        storage: &S,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) {
        self.push(Exchange::new(question, answer));

        if let Err(err) = self.save(storage) {
            tracing::warn!("Could not save conversation history: {}", err.message());
        }
    }

    pub fn save<S: StorageCapability>(&self, storage: &S) -> Result<(), StorageError> {
        let json = self.to_json()?;
        storage.set_item(STORAGE_KEY, &json)
    }

    pub fn clear<S: StorageCapability>(&mut self, storage: &S) {
        self.exchanges.clear();

        if let Err(err) = storage.remove_item(STORAGE_KEY) {
            tracing::warn!("Could not remove conversation history: {}", err.message());
        }
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// The newest `REPLAY_EXCHANGES` exchanges, oldest first.
    pub fn recent(&self) -> &[Exchange] {
        let start = self.exchanges.len().saturating_sub(REPLAY_EXCHANGES);
        &self.exchanges[start..]
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    fn truncate(&mut self) {
        if self.exchanges.len() > MAX_EXCHANGES {
            let excess = self.exchanges.len() - MAX_EXCHANGES;
            self.exchanges.drain(..excess);
        }
    }
}
