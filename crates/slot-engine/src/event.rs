//! Opening and appointment records.
//!
//! Events are owned by the storage layer; the engine only reads `kind`,
//! `starts_at`, `ends_at` and `weekly_recurring`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// What an event contributes to availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Time the calendar owner is open for bookings.
    Opening,
    /// Time already booked; always subtracted from openings.
    Appointment,
}

/// A single opening or appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Repeat every 7 days from `starts_at`. Ignored for appointments.
    #[serde(default)]
    pub weekly_recurring: bool,
}

impl Event {
    /// A one-off opening.
    pub fn opening(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::Opening,
            starts_at,
            ends_at,
            weekly_recurring: false,
        }
    }

    /// An opening that repeats every week from `starts_at`.
    pub fn recurring_opening(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            weekly_recurring: true,
            ..Self::opening(starts_at, ends_at)
        }
    }

    pub fn appointment(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::Appointment,
            starts_at,
            ends_at,
            weekly_recurring: false,
        }
    }

    /// Only openings recur; the flag is meaningless on appointments.
    pub fn is_recurring(&self) -> bool {
        self.kind == EventKind::Opening && self.weekly_recurring
    }

    /// Reject events whose range runs backwards.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRange` when `starts_at > ends_at`.
    pub fn validate(&self) -> Result<()> {
        if self.starts_at > self.ends_at {
            return Err(SlotError::InvalidRange {
                starts_at: self.starts_at,
                ends_at: self.ends_at,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event: {} -> {}", self.starts_at, self.ends_at)
    }
}
