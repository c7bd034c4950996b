//! Pointer handling for cards: pick up, drag, release and tap-to-open
//!
//! A press only turns into a drag once the pointer has stayed down longer
//! than the drag delay. After a drag ends, taps on cards are ignored for a
//! short window so the click that closes a drag does not open the card.

use crate::models::{ItemId, MotionState, StreamConfig, Vec2, VisibleItem};

/// Timing thresholds for drag detection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragTiming {
    pub drag_delay_ms: f64,
    pub click_suppression_ms: f64,
}

impl DragTiming {
    pub fn from_config(config: &StreamConfig) -> Self {
        Self {
            drag_delay_ms: config.drag_delay_ms,
            click_suppression_ms: config.click_suppression_ms,
        }
    }
}

/// A press on a card that may become a drag
#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
    item: ItemId,
    /// Pointer position relative to the card's top-left corner
    offset: Vec2,
    pressed_at: f64,
    dragging: bool,
}

/// What a pointer-up did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// No press was active
    Idle,
    /// The press never became a drag
    Click(ItemId),
    /// A drag ended; the card resumes its motion
    Dropped(ItemId),
}

/// Tracks the single active press and the post-drag tap suppression window
#[derive(Clone, Debug, Default)]
pub struct DragTracker {
    press: Option<Press>,
    suppress_until: Option<f64>,
}

fn find_mut(items: &mut [VisibleItem], id: ItemId) -> Option<&mut VisibleItem> {
    items.iter_mut().find(|item| item.id == id)
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card currently pressed, dragged or not
    pub fn pressed(&self) -> Option<ItemId> {
        self.press.map(|p| p.item)
    }

    /// Card currently being dragged
    pub fn held(&self) -> Option<ItemId> {
        self.press.filter(|p| p.dragging).map(|p| p.item)
    }

    /// Start a press on `item`; a press already in progress is released first
    pub fn pointer_down(
        &mut self,
        items: &mut [VisibleItem],
        item: ItemId,
        offset: Vec2,
        now: f64,
        timing: &DragTiming,
    ) {
        if self.press.is_some() {
            self.pointer_up(items, now, timing);
        }

        if items.iter().any(|i| i.id == item) {
            self.press = Some(Press {
                item,
                offset,
                pressed_at: now,
                dragging: false,
            });
        }
    }

    /// Track the pointer; after the drag delay the pressed card follows it
    ///
    /// Returns `true` when a card was moved.
    pub fn pointer_move(
        &mut self,
        items: &mut [VisibleItem],
        pointer: Vec2,
        now: f64,
        timing: &DragTiming,
    ) -> bool {
        let Some(press) = self.press.as_mut() else {
            return false;
        };

        if !press.dragging && now - press.pressed_at <= timing.drag_delay_ms {
            return false;
        }

        let Some(item) = find_mut(items, press.item) else {
            // Culled under the pointer
            self.press = None;
            return false;
        };

        if !press.dragging {
            press.dragging = true;
            log::debug!("Drag started on item {}", press.item);
        }
        item.state = MotionState::Held;
        item.position = pointer - press.offset;
        true
    }

    /// End the press; a drag opens the tap suppression window
    pub fn pointer_up(&mut self, items: &mut [VisibleItem], now: f64, timing: &DragTiming) -> Release {
        let Some(press) = self.press.take() else {
            return Release::Idle;
        };

        if !press.dragging {
            return Release::Click(press.item);
        }

        if let Some(item) = find_mut(items, press.item) {
            item.state = MotionState::Free;
        }
        self.suppress_until = Some(now + timing.click_suppression_ms);
        log::debug!("Drag ended on item {}", press.item);
        Release::Dropped(press.item)
    }

    /// Whether a tap at `now` should open the tapped card
    pub fn accepts_tap(&self, now: f64) -> bool {
        if self.held().is_some() {
            return false;
        }
        match self.suppress_until {
            Some(until) => now >= until,
            None => true,
        }
    }

    /// Forget a card that left the scene
    pub fn forget(&mut self, item: ItemId) {
        if self.pressed() == Some(item) {
            self.press = None;
        }
    }
}
