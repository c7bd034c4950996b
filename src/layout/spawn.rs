//! Initial positions and velocities of new cards

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{StreamConfig, Vec2};

/// Leftward headings a card can take; all are scaled by the jittered speed
pub const DIRECTIONS: [Vec2; 5] = [
    Vec2 { x: -1.0, y: 0.0 },
    Vec2 { x: -0.6, y: -0.4 },
    Vec2 { x: -0.6, y: 0.4 },
    Vec2 { x: -0.7, y: -0.3 },
    Vec2 { x: -0.7, y: 0.3 },
];

/// Horizontal band of the initial batch, as fractions of screen width
const INITIAL_X_START: f64 = 0.2;
const INITIAL_X_SPAN: f64 = 0.6;

/// Vertical space left out below the initial batch's band
const INITIAL_Y_RESERVE: f64 = 200.0;

/// Pick a heading and scale it by the base speed jittered within the configured band
pub fn random_velocity<R: Rng + ?Sized>(config: &StreamConfig, rng: &mut R) -> Vec2 {
    let direction = *DIRECTIONS.choose(rng).unwrap_or(&DIRECTIONS[0]);
    let jitter = config.speed_jitter;
    let factor = if jitter > 0.0 {
        rng.gen_range(1.0 - jitter..=1.0 + jitter)
    } else {
        1.0
    };
    direction.scale(config.base_speed * factor)
}

/// Position for a card of the initial batch: middle 60% of the width, random height
pub fn initial_position<R: Rng + ?Sized>(
    config: &StreamConfig,
    screen_width: f64,
    screen_height: f64,
    rng: &mut R,
) -> Vec2 {
    let x = screen_width * INITIAL_X_START + rng.gen::<f64>() * screen_width * INITIAL_X_SPAN;
    let span = (screen_height - INITIAL_Y_RESERVE).max(0.0);
    let y = config.margin + rng.gen::<f64>() * span;
    Vec2::new(x, y)
}
