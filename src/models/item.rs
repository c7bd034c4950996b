//! On-screen items
//!
//! A `VisibleItem` is one note rendered as a card. Its position and velocity
//! are in screen units; velocity is applied once per frame.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a visible item, unique within one scene
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A 2D point or displacement
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

/// Motion state of an item
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MotionState {
    #[default]
    Free,
    /// Being dragged; the motion engine leaves it alone
    Held,
}

/// A note currently on screen
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VisibleItem {
    pub id: ItemId,
    /// Index into the scene's note store
    pub note_index: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub state: MotionState,
}

impl VisibleItem {
    pub fn new(id: ItemId, note_index: usize, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            note_index,
            position,
            velocity,
            state: MotionState::Free,
        }
    }

    pub fn is_held(&self) -> bool {
        self.state == MotionState::Held
    }
}
