use crate::nice_display::NiceDisplay;
use std::env::VarError;
use std::path::PathBuf;

const DEFAULT_API_ORIGIN: &str = "http://127.0.0.1:8000";
const DEFAULT_STORAGE_PATH: &str = "storage.json";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_origin: String,
    pub storage_path: PathBuf,
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub chat: String,
    pub health: String,
}

impl Endpoints {
    pub fn from_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');

        Endpoints {
            chat: format!("{}/api/chat", origin),
            health: format!("{}/api/health", origin),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadingApiOrigin(dotenv::Error),
    ReadingStoragePath(dotenv::Error),
    ReadingLogDir(dotenv::Error),
    InvalidApiOrigin(String),
}

impl NiceDisplay for ConfigError {
    fn message(&self) -> String {
        match self {
            ConfigError::ReadingApiOrigin(err) => format!("Error reading CHAT_API_ORIGIN: {}", err),
            ConfigError::ReadingStoragePath(err) => {
                format!("Error reading CHAT_STORAGE_PATH: {}", err)
            }
            ConfigError::ReadingLogDir(err) => format!("Error reading CHAT_LOG_DIR: {}", err),
            ConfigError::InvalidApiOrigin(origin) => {
                format!(
                    "CHAT_API_ORIGIN must start with http:// or https://, got \"{}\"",
                    origin
                )
            }
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        let api_origin = var_or("CHAT_API_ORIGIN", DEFAULT_API_ORIGIN)
            .map_err(ConfigError::ReadingApiOrigin)?;
        let storage_path = var_or("CHAT_STORAGE_PATH", DEFAULT_STORAGE_PATH)
            .map_err(ConfigError::ReadingStoragePath)?;
        let log_dir = var_or("CHAT_LOG_DIR", DEFAULT_LOG_DIR).map_err(ConfigError::ReadingLogDir)?;

        if !(api_origin.starts_with("http://") || api_origin.starts_with("https://")) {
            return Err(ConfigError::InvalidApiOrigin(api_origin));
        }

        Ok(Config {
            api_origin,
            storage_path: PathBuf::from(storage_path),
            log_dir: PathBuf::from(log_dir),
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::from_origin(&self.api_origin)
    }
}

fn var_or(name: &str, default: &str) -> Result<String, dotenv::Error> {
    match dotenv::var(name) {
        Ok(value) => Ok(value),
        Err(dotenv::Error::EnvVar(VarError::NotPresent)) => Ok(default.to_string()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_vars() {
        for name in ["CHAT_API_ORIGIN", "CHAT_STORAGE_PATH", "CHAT_LOG_DIR"] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_endpoints_from_origin() {
        let endpoints = Endpoints::from_origin("https://chat.example.com/");

        assert_eq!(endpoints.chat, "https://chat.example.com/api/chat");
        assert_eq!(endpoints.health, "https://chat.example.com/api/health");
    }

    #[test]
    #[serial]
    fn test_load_uses_defaults() {
        clear_vars();

        let config = Config::load().unwrap();

        assert_eq!(config.api_origin, DEFAULT_API_ORIGIN);
        assert_eq!(config.storage_path, PathBuf::from("storage.json"));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    #[serial]
    fn test_load_reads_environment() {
        clear_vars();
        std::env::set_var("CHAT_API_ORIGIN", "http://10.0.0.5:9000");
        std::env::set_var("CHAT_STORAGE_PATH", "/tmp/chat.json");

        let config = Config::load().unwrap();
        clear_vars();

        assert_eq!(config.endpoints().health, "http://10.0.0.5:9000/api/health");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/chat.json"));
    }

    #[test]
    #[serial]
    fn test_load_rejects_origin_without_scheme() {
        clear_vars();
        std::env::set_var("CHAT_API_ORIGIN", "localhost:8000");

        let result = Config::load();
        clear_vars();

        assert!(matches!(result, Err(ConfigError::InvalidApiOrigin(_))));
    }
}
