use std::fmt::Display;

pub struct NiceError {
    content: String,
}

impl Display for NiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Human readable error text. Every error enum in the crate implements this
/// so that startup failures, toasts and log lines all read the same way.
pub trait NiceDisplay {
    fn message(&self) -> String;
    fn to_nice_error(&self) -> NiceError {
        NiceError {
            content: self.message(),
        }
    }
}

impl NiceDisplay for std::io::Error {
    fn message(&self) -> String {
        format!("IO error: {}", self)
    }
}

impl NiceDisplay for serde_json::Error {
    fn message(&self) -> String {
        format!("JSON error at line {} column {}: {}", self.line(), self.column(), self)
    }
}
