//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SlotError {
    #[error("Invalid slot duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid time range: starts at {starts_at} but ends at {ends_at}")]
    InvalidRange {
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },

    #[error("Date out of range: {0}")]
    OutOfRange(String),

    #[error("Event source error: {0}")]
    Source(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
