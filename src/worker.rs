mod chat_capability;
mod storage_capability;

use crate::config::{Config, Endpoints};
use crate::nice_display::NiceDisplay;
use std::path::PathBuf;

const USER_AGENT: &str = concat!("revnix-chat/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct Worker {
    pub reqwest_client: reqwest::Client,
    pub endpoints: Endpoints,
    pub storage_path: PathBuf,
}

#[derive(Debug)]
pub enum InitError {
    HttpClient(reqwest::Error),
}

impl NiceDisplay for InitError {
    fn message(&self) -> String {
        match self {
            InitError::HttpClient(err) => format!("Error building the HTTP client\n{}", err),
        }
    }
}

impl Worker {
    pub fn new(config: &Config) -> Result<Self, InitError> {
        // No request timeout: a slow answer keeps the widget waiting.
        let reqwest_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(InitError::HttpClient)?;

        Ok(Worker {
            reqwest_client,
            endpoints: config.endpoints(),
            storage_path: config.storage_path.clone(),
        })
    }
}
