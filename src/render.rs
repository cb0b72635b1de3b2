use crate::domain::message::{Message, Role};
use crate::format::format_message_text;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub role: Role,
    pub welcome: bool,
    pub class: String,
    pub markup: String,
    pub time: String,
}

impl RenderedMessage {
    fn from_message(message: &Message, welcome: bool) -> Self {
        let mut class = format!("message {}-message", message.role().to_str());
        if welcome {
            class.push_str(" welcome-message");
        }

        Self {
            role: message.role(),
            welcome,
            class,
            markup: format_message_text(message.text()),
            time: message.timestamp().format("%H:%M").to_string(),
        }
    }
}

/// The welcome message always comes first and is flagged so clearing the
/// chat can leave it in place.
pub fn render_messages(welcome: &Message, messages: &[Message]) -> Vec<RenderedMessage> {
    std::iter::once(RenderedMessage::from_message(welcome, true))
        .chain(
            messages
                .iter()
                .map(|message| RenderedMessage::from_message(message, false)),
        )
        .collect()
}

pub fn to_html(rendered: &[RenderedMessage]) -> String {
    rendered
        .iter()
        .map(|message| {
            let role = message.role.to_str();
            format!(
                r#"<div class="{}"><div class="message-avatar {}-avatar"></div><div class="message-content"><div class="message-text">{}</div></div></div>"#,
                message.class, role, message.markup
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}
