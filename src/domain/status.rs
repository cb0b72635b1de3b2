#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Online,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub status: Status,
    pub text: String,
}

impl ConnectionStatus {
    pub fn connecting() -> Self {
        Self::new(Status::Warning, "Connecting...")
    }

    pub fn ready() -> Self {
        Self::new(Status::Online, "Ready to chat")
    }

    pub fn initializing() -> Self {
        Self::new(Status::Warning, "Initializing...")
    }

    pub fn connection_error() -> Self {
        Self::new(Status::Error, "Connection error")
    }

    fn new(status: Status, text: &str) -> Self {
        Self {
            status,
            text: text.to_string(),
        }
    }
}
