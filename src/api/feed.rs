//! WASM API for paginated feed loading
//!
//! The host page owns `fetch`. It asks the loader which URL to request next,
//! passes each response body back, and stops when `acceptPage` returns false:
//!
//! ```js
//! const feed = new FeedLoader(config);
//! for (let url = feed.nextUrl(); url; url = feed.nextUrl()) {
//!     const response = await fetch(url);
//!     feed.acceptPage(await response.text());
//! }
//! ```

use wasm_bindgen::prelude::*;

use super::helpers::{config_from_js, to_js_error};
use crate::feed::FeedLoader;
use crate::models::Note;
use crate::{wasm_info, wasm_warn};

#[wasm_bindgen(js_name = FeedLoader)]
pub struct FeedHandle {
    inner: FeedLoader,
}

#[wasm_bindgen(js_class = FeedLoader)]
impl FeedHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FeedHandle, JsValue> {
        let config = config_from_js(config)?;
        Ok(Self {
            inner: FeedLoader::new(&config),
        })
    }

    /// URL of the next page, or `undefined` when the listing is complete
    #[wasm_bindgen(js_name = nextUrl)]
    pub fn next_url(&self) -> Option<String> {
        self.inner.next_url()
    }

    /// Take in one response body; returns whether another page should be fetched
    #[wasm_bindgen(js_name = acceptPage)]
    pub fn accept_page(&mut self, body: &str) -> Result<bool, JsValue> {
        let page = self.inner.page();
        let more = self.inner.accept_json(body).map_err(|e| {
            wasm_warn!("Page {} rejected: {}", page, e);
            to_js_error(e)
        })?;

        if !more {
            wasm_info!(
                "Feed complete: {} blocks, {} text notes",
                self.inner.blocks_seen(),
                self.inner.notes().len()
            );
        }
        Ok(more)
    }

    #[wasm_bindgen(js_name = isDone)]
    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    #[wasm_bindgen(js_name = noteCount)]
    pub fn note_count(&self) -> usize {
        self.inner.notes().len()
    }
}

impl FeedHandle {
    pub fn notes(&self) -> Vec<Note> {
        self.inner.notes().to_vec()
    }
}
