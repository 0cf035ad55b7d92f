//! Engine settings.

use chrono::Duration;
use serde::Deserialize;

use crate::error::{Result, SlotError};

/// Slot length used when none is configured.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvailabilityConfig {
    /// Length of a bookable slot in minutes.
    pub slot_minutes: u32,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_SLOT_MINUTES,
        }
    }
}

impl AvailabilityConfig {
    /// Parse a JSON object such as `{"slot_minutes": 15}`. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    /// Returns `SlotError::Config` if the JSON is malformed or the values are invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_slot_minutes(mut self, slot_minutes: u32) -> Self {
        self.slot_minutes = slot_minutes;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.slot_minutes == 0 {
            return Err(SlotError::Config("slot_minutes must be positive".to_string()));
        }
        Ok(())
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_minutes))
    }
}
