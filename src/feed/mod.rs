//! Loading notes from the paginated content API
//!
//! - `page`: JSON model of a listing page and the text-block filter
//! - `loader`: pagination state and the `ContentSource` seam
//! - `http`: blocking `minreq` source (native builds only)
//! - `errors`: `LoadError`

pub mod errors;
pub mod loader;
pub mod page;

#[cfg(not(target_arch = "wasm32"))]
pub mod http;

pub use errors::LoadError;
pub use loader::{load_all, ContentSource, FeedLoader};
pub use page::{ContentBlock, ContentPage};

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpSource;
