//! Shared types for the WASM API
//!
//! Plain data handed to JavaScript after each frame and on request.

use serde::Serialize;

use crate::models::VisibleItem;
use crate::scene::{FrameEvents, Scene};
use crate::text::preview_text;

/// A card as the host needs it to create an element
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub held: bool,
    pub preview: String,
}

/// Current position of a card
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct ItemPosition {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl From<&VisibleItem> for ItemPosition {
    fn from(item: &VisibleItem) -> Self {
        Self {
            id: item.id.0,
            x: item.position.x,
            y: item.position.y,
        }
    }
}

/// Everything the host must apply after a frame
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameUpdate {
    pub frame: u64,
    /// Cards to create
    pub spawned: Vec<ItemView>,
    /// Positions of every active card
    pub positions: Vec<ItemPosition>,
    /// Cards to remove
    pub removed: Vec<u32>,
}

impl FrameUpdate {
    pub fn build(scene: &Scene, events: &FrameEvents) -> Self {
        let words = scene.config().preview_words;
        let spawned = events
            .spawned
            .iter()
            .filter_map(|id| {
                let item = scene.item(*id)?;
                let note = scene.note_of(*id)?;
                Some(ItemView {
                    id: id.0,
                    x: item.position.x,
                    y: item.position.y,
                    held: item.is_held(),
                    preview: preview_text(&note.content, words),
                })
            })
            .collect();

        Self {
            frame: scene.frame_count(),
            spawned,
            positions: scene.items().iter().map(ItemPosition::from).collect(),
            removed: events.removed.iter().map(|id| id.0).collect(),
        }
    }
}

/// Summary of a stream's state
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamSnapshot {
    pub running: bool,
    pub notes: usize,
    pub active: usize,
    pub held: Option<u32>,
    pub frame: u64,
    pub frames_per_second: Option<f64>,
    pub next_spawn_ms: Option<f64>,
}
