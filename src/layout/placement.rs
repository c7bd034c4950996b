//! Spawn-time placement of new cards
//!
//! New cards enter at the right edge. The planner draws random heights and
//! keeps the first one that is far enough from every card still close to that
//! edge. It is a best-effort search: when no candidate fits within the attempt
//! budget, one more random height is returned and the overlap is accepted.

use rand::Rng;

use crate::models::{StreamConfig, VisibleItem};

/// Thresholds used by the placement search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRules {
    pub item_height: f64,
    pub margin: f64,
    pub attempts: u32,
    /// Horizontal distance from the right edge under which a card is a neighbour
    pub near_distance: f64,
    /// Required vertical distance to every neighbour
    pub min_gap: f64,
}

impl PlacementRules {
    pub fn from_config(config: &StreamConfig) -> Self {
        Self {
            item_height: config.item_height,
            margin: config.margin,
            attempts: config.placement_attempts,
            near_distance: config.near_distance,
            min_gap: config.min_vertical_gap(),
        }
    }

    /// Inclusive range of allowed heights, or `None` when the screen is too short
    pub fn y_range(&self, screen_height: f64) -> Option<(f64, f64)> {
        let min = self.margin;
        let max = screen_height - self.item_height - self.margin;
        (max > min).then_some((min, max))
    }

    /// Whether `y` keeps the required distance from every neighbour of the right edge
    pub fn is_clear(&self, y: f64, existing: &[VisibleItem], screen_width: f64) -> bool {
        existing.iter().all(|item| {
            let horizontal = (screen_width - item.position.x).abs();
            let vertical = (y - item.position.y).abs();
            horizontal >= self.near_distance || vertical >= self.min_gap
        })
    }
}

/// Result of a placement search
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// A candidate satisfied the distance rule on the given attempt (0-based)
    Clear { y: f64, attempt: u32 },
    /// Every attempt overlapped; `y` is an unconditional random fallback
    Fallback { y: f64 },
}

impl Placement {
    pub fn y(&self) -> f64 {
        match *self {
            Placement::Clear { y, .. } | Placement::Fallback { y } => y,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Placement::Clear { .. })
    }
}

/// Search for a height at which a card entering from the right edge does not overlap
pub fn plan<R: Rng + ?Sized>(
    rules: &PlacementRules,
    existing: &[VisibleItem],
    screen_width: f64,
    screen_height: f64,
    rng: &mut R,
) -> Placement {
    let Some((min, max)) = rules.y_range(screen_height) else {
        log::debug!("Screen height {} too short for placement, using margin", screen_height);
        return Placement::Fallback { y: rules.margin };
    };
    let mut candidate = || min + rng.gen::<f64>() * (max - min);

    for attempt in 0..rules.attempts {
        let y = candidate();
        if rules.is_clear(y, existing, screen_width) {
            return Placement::Clear { y, attempt };
        }
    }

    let y = candidate();
    log::debug!(
        "No clear slot after {} attempts among {} items, falling back to y={:.1}",
        rules.attempts,
        existing.len(),
        y
    );
    Placement::Fallback { y }
}

/// Height for a new card entering from the right edge
pub fn find_y<R: Rng + ?Sized>(
    rules: &PlacementRules,
    existing: &[VisibleItem],
    screen_width: f64,
    screen_height: f64,
    rng: &mut R,
) -> f64 {
    plan(rules, existing, screen_width, screen_height, rng).y()
}
