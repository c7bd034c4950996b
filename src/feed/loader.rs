//! Pagination over the channel listing
//!
//! Pages are requested in order starting at 1. A page holding exactly
//! `page_size` entries means more may follow; a shorter or empty page ends
//! the listing. There is no retry: the first failure aborts the load.

use super::errors::LoadError;
use super::page::{ContentBlock, ContentPage};
use crate::models::{Note, StreamConfig};

/// Anything that can fetch a listing page by URL
pub trait ContentSource {
    fn fetch_page(&mut self, url: &str) -> Result<ContentPage, LoadError>;
}

/// Accumulates text notes across pages and decides when to stop
#[derive(Clone, Debug)]
pub struct FeedLoader {
    config: StreamConfig,
    page: u32,
    blocks_seen: usize,
    notes: Vec<Note>,
    done: bool,
}

impl FeedLoader {
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            config: config.clone(),
            page: 1,
            blocks_seen: 0,
            notes: Vec::new(),
            done: false,
        }
    }

    /// URL of the next page to request, or `None` once the listing ended
    pub fn next_url(&self) -> Option<String> {
        (!self.done).then(|| self.config.page_url(self.page))
    }

    /// 1-based number of the next page
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Blocks of any class received so far
    pub fn blocks_seen(&self) -> usize {
        self.blocks_seen
    }

    /// Text notes collected so far
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Take in one page; returns whether another page should be requested
    pub fn accept(&mut self, page: ContentPage) -> bool {
        if self.done {
            return false;
        }

        let count = page.len();
        self.blocks_seen += count;
        self.notes
            .extend(page.into_blocks().into_iter().filter_map(ContentBlock::into_note));

        log::info!(
            "Loaded page {}, total blocks so far: {}",
            self.page,
            self.blocks_seen
        );

        if count < self.config.page_size {
            self.done = true;
        } else {
            self.page += 1;
        }
        !self.done
    }

    /// Parse a page body and take it in
    pub fn accept_json(&mut self, json: &str) -> Result<bool, LoadError> {
        let page = ContentPage::from_json(json)?;
        Ok(self.accept(page))
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }
}

/// Fetch every page from `source` and return the text notes in listing order
pub fn load_all<S: ContentSource + ?Sized>(
    source: &mut S,
    config: &StreamConfig,
) -> Result<Vec<Note>, LoadError> {
    let mut loader = FeedLoader::new(config);
    while let Some(url) = loader.next_url() {
        let page = source.fetch_page(&url).map_err(|e| {
            log::error!("Failed to load {}: {}", url, e);
            e
        })?;
        loader.accept(page);
    }

    log::info!(
        "Total blocks loaded: {}, text notes: {}",
        loader.blocks_seen(),
        loader.notes().len()
    );
    Ok(loader.into_notes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_page(start: u64, count: usize) -> ContentPage {
        ContentPage::new(
            (0..count as u64)
                .map(|i| ContentBlock {
                    id: Some(start + i),
                    class: Some("Text".to_string()),
                    content: Some(format!("note {}", start + i)),
                })
                .collect(),
        )
    }

    #[test]
    fn test_full_page_continues_short_page_stops() {
        let mut loader = FeedLoader::new(&StreamConfig::default());

        assert!(loader.next_url().unwrap().ends_with("per=100&page=1"));
        assert!(loader.accept(text_page(0, 100)));
        assert!(loader.next_url().unwrap().ends_with("page=2"));
        assert!(!loader.accept(text_page(100, 40)));

        assert!(loader.is_done());
        assert_eq!(loader.next_url(), None);
        assert_eq!(loader.notes().len(), 140);
    }

    #[test]
    fn test_empty_page_stops() {
        let mut loader = FeedLoader::new(&StreamConfig::default());
        assert!(!loader.accept(ContentPage::default()));
        assert!(loader.notes().is_empty());
    }

    #[test]
    fn test_pages_after_done_are_ignored() {
        let mut loader = FeedLoader::new(&StreamConfig::default());
        loader.accept(text_page(0, 3));
        assert!(!loader.accept(text_page(3, 100)));
        assert_eq!(loader.notes().len(), 3);
    }

    #[test]
    fn test_accept_json_reports_decode_errors() {
        let mut loader = FeedLoader::new(&StreamConfig::default());
        assert!(loader.accept_json("not json").is_err());
        assert_eq!(loader.accept_json(r#"{"contents": []}"#), Ok(false));
    }
}
