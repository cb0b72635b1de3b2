use regex::Regex;
use std::sync::LazyLock;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?://[^\s]+)").expect("URL pattern is valid"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("italic pattern is valid"));

/// Turns chat text into markup: bare URLs become links that open in a new
/// window with no opener, `\n` becomes `<br>`, `**x**` becomes bold and
/// `*x*` italic.
///
/// The substitutions run in exactly that order, and each later pass also
/// sees the markup produced by the earlier ones.
///
/// The input is NOT html-escaped. Any markup already in the text, from the
/// user or from the server, passes straight through. The native view only
/// understands the tags produced here and shows anything else as plain
/// text, but callers writing this output into a real HTML document would
/// be open to injection.
pub fn format_message_text(text: &str) -> String {
    let text = URL.replace_all(
        text,
        r#"<a href="${1}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
    );
    let text = text.replace('\n', "<br>");
    let text = BOLD.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");

    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(format_message_text("hello"), "hello");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            format_message_text("**a** and *b*"),
            "<strong>a</strong> and <em>b</em>"
        );
    }

    #[test]
    fn test_url_linkified() {
        assert_eq!(
            format_message_text("see http://x.com now"),
            r#"see <a href="http://x.com" target="_blank" rel="noopener noreferrer">http://x.com</a> now"#
        );
    }

    #[test]
    fn test_https_url_at_end() {
        assert_eq!(
            format_message_text("docs: https://revnix.com/about"),
            r#"docs: <a href="https://revnix.com/about" target="_blank" rel="noopener noreferrer">https://revnix.com/about</a>"#
        );
    }

    #[test]
    fn test_emphasis_inside_url_reaches_href() {
        assert_eq!(
            format_message_text("see http://x.com/*a* now"),
            r#"see <a href="http://x.com/<em>a</em>" target="_blank" rel="noopener noreferrer">http://x.com/<em>a</em></a> now"#
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(format_message_text("one\ntwo\n"), "one<br>two<br>");
    }

    #[test]
    fn test_emphasis_spans_line_breaks() {
        assert_eq!(format_message_text("*a\nb*"), "<em>a<br>b</em>");
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert_eq!(format_message_text("<b>hi</b>"), "<b>hi</b>");
    }
}
