pub const MAX_CHARS: usize = 500;
const WARNING_ABOVE: usize = 450;
const ERROR_ABOVE: usize = 480;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCountLevel {
    Normal,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    pub count: usize,
}

impl CharCount {
    pub fn of(input: &str) -> Self {
        Self {
            count: input.chars().count(),
        }
    }

    pub fn level(&self) -> CharCountLevel {
        if self.count > ERROR_ABOVE {
            CharCountLevel::Error
        } else if self.count > WARNING_ABOVE {
            CharCountLevel::Warning
        } else {
            CharCountLevel::Normal
        }
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.count, MAX_CHARS)
    }
}

/// Cuts `input` down to `MAX_CHARS` characters.
pub fn clamp(input: String) -> String {
    match input.char_indices().nth(MAX_CHARS) {
        Some((byte_index, _)) => input[..byte_index].to_string(),
        None => input,
    }
}
