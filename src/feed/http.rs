//! Blocking HTTP source for native builds
//!
//! In the browser the host page performs the fetch and hands each body to
//! `FeedLoader::accept_json`; this source is for native tools and tests
//! against a live endpoint.

use super::errors::LoadError;
use super::loader::ContentSource;
use super::page::ContentPage;

const USER_AGENT: &str = concat!("thought-stream/", env!("CARGO_PKG_VERSION"));

/// Fetches listing pages with `minreq`
#[derive(Clone, Debug)]
pub struct HttpSource {
    timeout_secs: u64,
}

impl HttpSource {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ContentSource for HttpSource {
    fn fetch_page(&mut self, url: &str) -> Result<ContentPage, LoadError> {
        log::debug!("GET {}", url);

        let response = minreq::get(url)
            .with_header("User-Agent", USER_AGENT)
            .with_header("Accept", "application/json")
            .with_timeout(self.timeout_secs)
            .send()
            .map_err(|e| LoadError::Network(e.to_string()))?;

        if !(200..300).contains(&response.status_code) {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: response.status_code,
            });
        }

        response
            .json::<ContentPage>()
            .map_err(|e| LoadError::Decode(e.to_string()))
    }
}
