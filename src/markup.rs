//! Reads the markup produced by `format::format_message_text` back into
//! styled runs for the native view. Only the tags the formatter emits are
//! understood; anything else stays in the text verbatim.

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="([^"]*)"[^>]*>|</a>|<br>|</?strong>|</?em>"#)
        .expect("tag pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub link: Option<String>,
}

#[derive(Default)]
struct Style {
    bold: bool,
    italic: bool,
    link: Option<String>,
}

impl Style {
    fn span(&self, text: &str) -> Span {
        Span {
            text: text.to_string(),
            bold: self.bold,
            italic: self.italic,
            link: self.link.clone(),
        }
    }
}

/// The formatter's emphasis pass also rewrites asterisks inside an href.
/// Puts them back so the link opens the URL that was in the text.
fn restore_href(href: &str) -> String {
    href.replace("<strong>", "**")
        .replace("</strong>", "**")
        .replace("<em>", "*")
        .replace("</em>", "*")
}

pub fn parse(markup: &str) -> Vec<Span> {
    let mut spans = vec![];
    let mut style = Style::default();
    let mut last = 0;

    for caps in TAG.captures_iter(markup) {
        let Some(tag) = caps.get(0) else {
            continue;
        };

        if tag.start() > last {
            spans.push(style.span(&markup[last..tag.start()]));
        }
        last = tag.end();

        match tag.as_str() {
            "<br>" => spans.push(style.span("\n")),
            "<strong>" => style.bold = true,
            "</strong>" => style.bold = false,
            "<em>" => style.italic = true,
            "</em>" => style.italic = false,
            "</a>" => style.link = None,
            _ => style.link = caps.get(1).map(|href| restore_href(href.as_str())),
        }
    }

    if last < markup.len() {
        spans.push(style.span(&markup[last..]));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_message_text;

    fn plain(text: &str) -> Span {
        Span {
            text: text.to_string(),
            bold: false,
            italic: false,
            link: None,
        }
    }

    #[test]
    fn test_plain_text_is_one_span() {
        assert_eq!(parse("hello"), vec![plain("hello")]);
    }

    #[test]
    fn test_emphasis_and_breaks() {
        let spans = parse(&format_message_text("**Hi**\n*there*"));

        assert_eq!(
            spans,
            vec![
                Span {
                    bold: true,
                    ..plain("Hi")
                },
                plain("\n"),
                Span {
                    italic: true,
                    ..plain("there")
                },
            ]
        );
    }

    #[test]
    fn test_link_carries_href() {
        let spans = parse(&format_message_text("see http://x.com now"));

        assert_eq!(
            spans,
            vec![
                plain("see "),
                Span {
                    link: Some("http://x.com".to_string()),
                    ..plain("http://x.com")
                },
                plain(" now"),
            ]
        );
    }

    #[test]
    fn test_link_href_keeps_asterisks() {
        let spans = parse(&format_message_text("see http://x.com/*a* now"));
        let href = Some("http://x.com/*a*".to_string());

        assert_eq!(
            spans,
            vec![
                plain("see "),
                Span {
                    link: href.clone(),
                    ..plain("http://x.com/")
                },
                Span {
                    italic: true,
                    link: href,
                    ..plain("a")
                },
                plain(" now"),
            ]
        );
    }

    #[test]
    fn test_unknown_tags_stay_literal() {
        assert_eq!(
            parse("<script>alert(1)</script>"),
            vec![plain("<script>alert(1)</script>")]
        );
    }
}
