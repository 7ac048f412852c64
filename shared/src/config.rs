use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Tunables for one booth. Everything has a sensible default so the
/// frontend only overrides what the page location tells it to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaffleConfig {
    pub storage_key: String,
    pub admin_password: String,
    pub spin_duration_ms: u32,
    pub min_turns: u32,
    pub max_turns: u32,
    pub jitter_degrees: f64,
    pub pointer_angle: f64,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            spin_duration_ms: SPIN_DURATION_MS,
            min_turns: MIN_TURNS,
            max_turns: MAX_TURNS,
            jitter_degrees: JITTER_DEGREES,
            pointer_angle: POINTER_ANGLE,
        }
    }
}

impl RaffleConfig {
    /// Scopes the storage key to a named booth so several wheels can share
    /// one origin without clobbering each other's stock.
    pub fn for_booth(booth: &str) -> Self {
        let booth = booth.trim();
        let mut config = Self::default();
        if !booth.is_empty() {
            config.storage_key = format!("{}:{}", STORAGE_KEY, booth);
        }
        config
    }

    /// Turn range with the bounds put in order.
    pub fn turn_range(&self) -> std::ops::RangeInclusive<u32> {
        let lo = self.min_turns.min(self.max_turns);
        let hi = self.min_turns.max(self.max_turns);
        lo..=hi
    }
}
