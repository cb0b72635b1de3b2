pub mod char_count;
pub mod history;
pub mod message;
pub mod status;
pub mod toast;
