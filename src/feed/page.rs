//! JSON model of one page of the channel listing

use serde::{Deserialize, Serialize};

use super::errors::LoadError;
use crate::models::Note;

/// Block class carrying plain text
pub const TEXT_CLASS: &str = "Text";

/// One entry of a listing page
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ContentBlock {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentBlock {
    /// The block as a note, if it is a text block with content
    pub fn into_note(self) -> Option<Note> {
        if self.class.as_deref() != Some(TEXT_CLASS) {
            return None;
        }
        let content = self.content.filter(|c| !c.is_empty())?;
        Some(Note {
            id: self.id,
            content,
        })
    }
}

/// A page of the listing; only `contents` is read
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ContentPage {
    #[serde(default)]
    contents: Option<Vec<ContentBlock>>,
}

impl ContentPage {
    pub fn new(contents: Vec<ContentBlock>) -> Self {
        Self {
            contents: Some(contents),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.contents.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_blocks(self) -> Vec<ContentBlock> {
        self.contents.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_listing() {
        let page = ContentPage::from_json(
            r#"{
                "title": "channel",
                "contents": [
                    {"id": 1, "class": "Text", "content": "hello"},
                    {"id": 2, "class": "Image", "image": {"url": "x"}},
                    {"id": 3, "class": "Text", "content": ""}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(page.len(), 3);
        let notes: Vec<_> = page.into_blocks().into_iter().filter_map(ContentBlock::into_note).collect();
        assert_eq!(notes, vec![Note::with_id(1, "hello")]);
    }

    #[test]
    fn test_missing_or_null_contents_is_empty() {
        assert!(ContentPage::from_json("{}").unwrap().is_empty());
        assert!(ContentPage::from_json(r#"{"contents": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = ContentPage::from_json("<html>").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }
}
