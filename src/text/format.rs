//! Full-text HTML for the note detail view
//!
//! Text is escaped, URLs and email addresses become links, and line breaks
//! become `<br>`. Links are found on the escaped text in a single pass so an
//! address inside a URL is never linked twice.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// A URL runs until whitespace or an escaped character other than `&amp;`
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<url>https?://(?:[^\s<>&]|&amp;)+)|(?P<email>[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})")
        .expect("link pattern is valid")
});

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn linkify(escaped: &str) -> String {
    LINK_RE
        .replace_all(escaped, |caps: &Captures| {
            if let Some(url) = caps.name("url") {
                let url = url.as_str();
                format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>"#)
            } else {
                let email = &caps[0];
                format!(r#"<a href="mailto:{email}">{email}</a>"#)
            }
        })
        .into_owned()
}

/// HTML for the detail view of a note
pub fn format_note_html(content: &str) -> String {
    content
        .split('\n')
        .map(|line| linkify(&escape_html(line)))
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            format_note_html("<b>bold</b> & \"quoted\""),
            "&lt;b&gt;bold&lt;/b&gt; &amp; &quot;quoted&quot;"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(format_note_html("a\nb\n\nc"), "a<br>b<br><br>c");
    }

    #[test]
    fn test_url_at_end_of_line_stops_at_break() {
        let html = format_note_html("see https://example.com/path\nnext");
        assert_eq!(
            html,
            "see <a href=\"https://example.com/path\" target=\"_blank\" rel=\"noopener noreferrer\">https://example.com/path</a><br>next"
        );
    }

    #[test]
    fn test_email_link() {
        assert_eq!(
            format_note_html("write to me@example.org"),
            "write to <a href=\"mailto:me@example.org\">me@example.org</a>"
        );
    }

    #[test]
    fn test_quoted_url_stops_before_quote() {
        assert_eq!(
            format_note_html("\"https://a.test/x\" said"),
            "&quot;<a href=\"https://a.test/x\" target=\"_blank\" rel=\"noopener noreferrer\">https://a.test/x</a>&quot; said"
        );
    }

    #[test]
    fn test_query_string_ampersand_kept_in_link() {
        let html = format_note_html("https://a.test/?q=1&p=2 ok");
        assert!(html.starts_with("<a href=\"https://a.test/?q=1&amp;p=2\""));
        assert!(html.ends_with("</a> ok"));
    }

    #[test]
    fn test_address_inside_url_not_relinked() {
        let html = format_note_html("https://host.test/u/me@example.org");
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(!html.contains("mailto:"));
    }
}
