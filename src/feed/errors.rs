//! Error types for loading the note feed
//!
//! Loading has a single failure kind as far as the page is concerned: the
//! variants only differ in what went wrong, and all of them abort startup.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// Request could not be sent or the connection failed
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: i32 },

    /// Response body was not a content listing
    #[error("invalid response: {0}")]
    Decode(String),

    /// Error reported by the browser host while fetching
    #[error("{0}")]
    Host(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Decode(err.to_string())
    }
}
