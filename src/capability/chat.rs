use crate::nice_display::NiceDisplay;
use serde::{Deserialize, Serialize};

/// Body of the health endpoint. Both fields are optional so that any JSON
/// body, including error bodies from the server or a proxy in front of it,
/// reads as "not ready" rather than as a failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub agent_ready: Option<bool>,
}

impl Health {
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.agent_ready == Some(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    Network(String),
    Status(u16),
    Parse(String),
}

impl NiceDisplay for RequestError {
    fn message(&self) -> String {
        match self {
            RequestError::Network(err) => {
                format!("I had trouble reaching the chat server: {}", err)
            }
            RequestError::Status(code) => {
                format!("The chat server responded with HTTP status {}", code)
            }
            RequestError::Parse(err) => {
                format!("I had trouble decoding the response from the chat server: {}", err)
            }
        }
    }
}

pub trait ChatCapability {
    async fn check_health(&self) -> Result<Health, RequestError>;
    async fn ask(&self, question: &str) -> Result<String, RequestError>;
}
