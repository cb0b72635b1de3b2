use crate::domain::char_count::CharCountLevel;
use crate::domain::message::Role;
use crate::domain::status::Status;
use crate::domain::toast::ToastKind;
use iced::widget::container;
use iced::{border, font, Color, Font, Theme};

pub const S1: f32 = 4.0;
pub const S2: f32 = 8.0;
pub const S3: f32 = 12.0;
pub const S4: f32 = 16.0;
pub const INPUT_HEIGHT: f32 = 40.0;

pub const GREEN_SOFT: Color = Color::from_rgb(0.55, 0.78, 0.54);
pub const GRAY_MID: Color = Color::from_rgb(0.65, 0.65, 0.65);
pub const RED_SOFT: Color = Color::from_rgb(0.85, 0.45, 0.45);
pub const AMBER_SOFT: Color = Color::from_rgb(0.89, 0.75, 0.38);
pub const BLUE_LINK: Color = Color::from_rgb(0.45, 0.66, 0.95);

const USER_BUBBLE: Color = Color::from_rgb(0.16, 0.22, 0.34);
const BOT_BUBBLE: Color = Color::from_rgb(0.09, 0.12, 0.11);

pub fn font() -> Font {
    Font::with_name("Fira Code")
}

pub fn bold() -> Font {
    Font {
        weight: font::Weight::Bold,
        ..font()
    }
}

pub fn italic() -> Font {
    Font {
        style: font::Style::Italic,
        ..font()
    }
}

pub fn bold_italic() -> Font {
    Font {
        weight: font::Weight::Bold,
        style: font::Style::Italic,
        ..font()
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Online => GREEN_SOFT,
        Status::Warning => AMBER_SOFT,
        Status::Error => RED_SOFT,
    }
}

pub fn char_count_color(level: CharCountLevel) -> Color {
    match level {
        CharCountLevel::Normal => GRAY_MID,
        CharCountLevel::Warning => AMBER_SOFT,
        CharCountLevel::Error => RED_SOFT,
    }
}

pub fn bubble(role: Role) -> impl Fn(&Theme) -> container::Style {
    let background = match role {
        Role::User => USER_BUBBLE,
        Role::Bot => BOT_BUBBLE,
    };

    move |_| container::Style {
        background: Some(background.into()),
        border: border::Border {
            width: 1.0,
            color: Color::from_rgb(0.2, 0.2, 0.2),
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn toast(kind: ToastKind) -> impl Fn(&Theme) -> container::Style {
    let color = match kind {
        ToastKind::Info => GRAY_MID,
        ToastKind::Success => GREEN_SOFT,
        ToastKind::Error => RED_SOFT,
    };

    move |_| container::Style {
        text_color: Some(Color::BLACK),
        background: Some(color.into()),
        border: border::Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn theme() -> Theme {
    fn from_ints(r: u8, g: u8, b: u8) -> Color {
        Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    Theme::custom(
        "revnix".to_string(),
        iced::theme::Palette {
            background: from_ints(3, 9, 7),
            text: from_ints(176, 166, 154),
            primary: from_ints(227, 211, 75),
            success: from_ints(10, 202, 26),
            danger: from_ints(242, 29, 35),
        },
    )
}
