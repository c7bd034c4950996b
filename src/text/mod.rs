//! Note text as shown on cards and in the detail view

pub mod format;
pub mod preview;

pub use format::{escape_html, format_note_html};
pub use preview::{preview_text, EMPTY_PREVIEW};
