use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn to_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// A chat line. Fields are read-only once built; a message is never edited
/// after it has been shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    role: Role,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self::at(role, text, Utc::now())
    }

    pub fn at(role: Role, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

