//! Thought Stream WASM Module
//!
//! Notes fetched from a content channel drift across the page as draggable
//! cards. This crate holds the whole stream: feed pagination, the note store,
//! spawn placement, per-frame motion, drag handling and the DOM presenter.
//! The host page only forwards `fetch` responses, animation frames and
//! pointer events.

pub mod models;
pub mod layout;
pub mod interaction;
pub mod scene;
pub mod feed;
pub mod text;
pub mod utils;
pub mod dom;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use scene::{FrameEvents, Scene};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        wasm_warn!("Logger already initialized: {}", err);
    }

    log::info!("Thought Stream WASM module initialized");
}
