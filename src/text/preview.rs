//! Card preview text
//!
//! Notes start with a date line, which cards leave out. The rest is cut to a
//! word limit.

/// Shown when a note has nothing after its date line
pub const EMPTY_PREVIEW: &str = "[Note content...]";

/// Preview of a note: drop the first line, trim, keep at most `word_limit` words
pub fn preview_text(content: &str, word_limit: usize) -> String {
    let body = match content.split_once('\n') {
        Some((_, rest)) => rest.trim(),
        None => "",
    };

    if body.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }

    let words: Vec<&str> = body.split(' ').collect();
    if words.len() <= word_limit {
        return body.to_string();
    }
    format!("{}...", words[..word_limit].join(" "))
}
