//! Thought Stream WASM API
//!
//! JavaScript-facing API of the stream.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serialization and error conversion
//! - `types`: data handed to JavaScript (`FrameUpdate`, `StreamSnapshot`)
//! - `feed`: `FeedLoader`, pagination driven by the host's `fetch`
//! - `stream`: `ThoughtStream`, frames and pointer events

pub mod helpers;
pub mod types;
pub mod feed;
pub mod stream;

pub use feed::FeedHandle;
pub use stream::{format_note, preview, ThoughtStream};
pub use types::{FrameUpdate, ItemPosition, ItemView, StreamSnapshot};
