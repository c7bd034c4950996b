//! Stream configuration
//!
//! Every tunable of the stream lives here: feed location, item geometry,
//! placement thresholds, motion speeds and the scheduler intervals. Values
//! arrive from JavaScript as a partial object, so every field has a default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a configuration cannot drive a scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be finite")]
    NotFinite { field: &'static str },

    #[error("speed jitter must be within [0, 1) (got {0})")]
    JitterOutOfRange(f64),

    #[error("channel slug must not be empty")]
    EmptyChannel,
}

/// Tunables for a thought stream scene
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamConfig {
    /// Channel identifier on the content API
    pub channel: String,
    /// Base URL of the content API (no trailing slash)
    pub api_base: String,
    /// Entries requested per page; a shorter page ends pagination
    pub page_size: usize,

    /// Estimated rendered height of one card
    pub item_height: f64,
    /// Top/bottom margin kept free when placing a new card
    pub margin: f64,
    /// Random candidates tried before placement gives up
    pub placement_attempts: u32,
    /// Cards closer than this to the right edge count as neighbours
    pub near_distance: f64,
    /// Extra vertical gap required on top of `item_height`
    pub vertical_clearance: f64,

    /// Cards left of this x are culled
    pub exit_x: f64,
    /// Base speed in units per frame
    pub base_speed: f64,
    /// Relative speed jitter; 0.2 means +/-20%
    pub speed_jitter: f64,

    /// Milliseconds between right-edge spawns
    pub spawn_interval_ms: f64,
    /// Milliseconds between density resets
    pub density_reset_interval_ms: f64,
    /// Cards placed on screen when the stream starts
    pub initial_batch: usize,

    /// Pointer must be held this long before a move becomes a drag
    pub drag_delay_ms: f64,
    /// Taps within this window after a drag are ignored
    pub click_suppression_ms: f64,

    /// Words shown on a card before truncation
    pub preview_words: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel: "train-of-consciousness-g9snd2s-aia".to_string(),
            api_base: "https://api.are.na/v2".to_string(),
            page_size: 100,
            item_height: 240.0,
            margin: 50.0,
            placement_attempts: 30,
            near_distance: 500.0,
            vertical_clearance: 100.0,
            exit_x: -300.0,
            base_speed: 0.5,
            speed_jitter: 0.2,
            spawn_interval_ms: 5_000.0,
            density_reset_interval_ms: 120_000.0,
            initial_batch: 8,
            drag_delay_ms: 50.0,
            click_suppression_ms: 150.0,
            preview_words: 25,
        }
    }
}

impl StreamConfig {
    /// Minimum vertical distance between a new card and a neighbouring one
    pub fn min_vertical_gap(&self) -> f64 {
        self.item_height + self.vertical_clearance
    }

    /// Check that the configuration can drive a scene
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.trim().is_empty() {
            return Err(ConfigError::EmptyChannel);
        }

        let finite = [
            ("itemHeight", self.item_height),
            ("margin", self.margin),
            ("nearDistance", self.near_distance),
            ("verticalClearance", self.vertical_clearance),
            ("exitX", self.exit_x),
            ("baseSpeed", self.base_speed),
            ("dragDelayMs", self.drag_delay_ms),
            ("clickSuppressionMs", self.click_suppression_ms),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        let positive = [
            ("itemHeight", self.item_height),
            ("baseSpeed", self.base_speed),
            ("spawnIntervalMs", self.spawn_interval_ms),
            ("densityResetIntervalMs", self.density_reset_interval_ms),
            ("pageSize", self.page_size as f64),
            ("placementAttempts", self.placement_attempts as f64),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !(0.0..1.0).contains(&self.speed_jitter) {
            return Err(ConfigError::JitterOutOfRange(self.speed_jitter));
        }

        Ok(())
    }

    /// URL of the given 1-based page of the channel listing
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/channels/{}?per={}&page={}",
            self.api_base.trim_end_matches('/'),
            self.channel,
            self.page_size,
            page
        )
    }
}
