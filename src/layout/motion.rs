//! Per-frame motion of the active cards
//!
//! Movement is expressed in units per frame: there is no timestep and no
//! delta-time compensation, so the apparent speed follows the host's refresh
//! rate.

use crate::models::{ItemId, StreamConfig, VisibleItem};

/// Bounds and cull line for one motion step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionBounds {
    pub screen_height: f64,
    pub item_height: f64,
    /// Cards whose x drops below this are removed
    pub exit_x: f64,
}

impl MotionBounds {
    pub fn new(config: &StreamConfig, screen_height: f64) -> Self {
        Self {
            screen_height,
            item_height: config.item_height,
            exit_x: config.exit_x,
        }
    }

    /// Largest y at which a card still fits on screen
    pub fn floor(&self) -> f64 {
        self.screen_height - self.item_height
    }
}

/// Outcome of one motion step
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Cards whose vertical velocity flipped this frame
    pub bounced: Vec<ItemId>,
    /// Cards removed for leaving the left edge
    pub culled: Vec<ItemId>,
}

/// Move one card a single frame, returning whether it bounced
///
/// A flip only happens while the card is heading into the edge it touched, so
/// a card that ends up past an edge flips once and then travels back instead
/// of flipping every frame.
pub fn advance(item: &mut VisibleItem, bounds: &MotionBounds) -> bool {
    if item.is_held() {
        return false;
    }

    item.position = item.position + item.velocity;

    let y = item.position.y;
    let dy = item.velocity.y;
    let hit_top = y <= 0.0 && dy < 0.0;
    let hit_bottom = y >= bounds.floor() && dy > 0.0;
    if hit_top || hit_bottom {
        item.velocity.y = -dy;
        return true;
    }
    false
}

/// Advance every free card one frame and cull the ones past the left edge
///
/// Held cards are neither moved nor culled; a held card dragged past the cull
/// line is removed on the first frame after it is released.
pub fn step(items: &mut Vec<VisibleItem>, bounds: &MotionBounds) -> StepReport {
    let mut report = StepReport::default();

    for item in items.iter_mut() {
        if advance(item, bounds) {
            report.bounced.push(item.id);
        }
    }

    items.retain(|item| {
        let gone = !item.is_held() && item.position.x < bounds.exit_x;
        if gone {
            report.culled.push(item.id);
        }
        !gone
    });

    if !report.culled.is_empty() {
        log::debug!("Culled {} items past x={}", report.culled.len(), bounds.exit_x);
    }
    report
}
