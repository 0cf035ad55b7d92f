//! Split a time range into fixed-size slots.
//!
//! A slot is identified by its start instant alone, truncated to the whole second.
//! Two slots compare equal exactly when they start at the same second, and
//! [`Slot::key`] exposes that second as an integer for hashing and ordering.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SubsecRound, Utc};

use crate::error::{Result, SlotError};

/// Start instant of a fixed-duration interval.
///
/// Slots are only built from valid `DateTime<Utc>` values, so every slot has a
/// representable start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(DateTime<Utc>);

impl Slot {
    /// Slot starting at `instant`, truncated to the whole second.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Slot(instant.trunc_subsecs(0))
    }

    /// Seconds since the Unix epoch.
    pub fn key(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.0
    }

    /// Calendar date (UTC) the slot starts on.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Time of day as `H:MM`, hour without a leading zero (`"0:00"`, `"9:30"`).
    pub fn label(&self) -> String {
        self.0.format("%-H:%M").to_string()
    }
}

impl From<DateTime<Utc>> for Slot {
    fn from(instant: DateTime<Utc>) -> Self {
        Slot::from_datetime(instant)
    }
}

/// Divide `start..end` into slots of `duration`, returning their start instants.
///
/// Slots start at `start + k * duration` for every `k` whose start is no later than
/// `end - duration / 2`. The last full slot before `end` is included; `end` itself
/// never starts a slot, and neither does a trailing fragment shorter than half a
/// slot. For example `09:00..10:30` in 30-minute slots yields `09:00, 09:30, 10:00`.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` if `duration` is not a positive whole number
/// of seconds, and `SlotError::InvalidRange` if `start > end`.
pub fn get_slots(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration: Duration,
) -> Result<Vec<Slot>> {
    let step = step_seconds(duration)?;
    if start > end {
        return Err(SlotError::InvalidRange {
            starts_at: start,
            ends_at: end,
        });
    }

    let first = start.timestamp();
    let last = end.timestamp() - step / 2;
    if last < first {
        return Ok(Vec::new());
    }

    let step = usize::try_from(step)
        .map_err(|_| SlotError::InvalidDuration(format!("{} seconds", step)))?;

    (first..=last)
        .step_by(step)
        .map(|seconds| {
            DateTime::from_timestamp(seconds, 0)
                .map(Slot)
                .ok_or_else(|| SlotError::OutOfRange(format!("{} seconds since epoch", seconds)))
        })
        .collect()
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `duration` in seconds, if it is a positive whole number of them.
pub(crate) fn step_seconds(duration: Duration) -> Result<i64> {
    let seconds = duration.num_seconds();
    if seconds <= 0 || duration != Duration::seconds(seconds) {
        return Err(SlotError::InvalidDuration(format!(
            "expected a positive whole number of seconds, got {}",
            duration
        )));
    }
    Ok(seconds)
}
