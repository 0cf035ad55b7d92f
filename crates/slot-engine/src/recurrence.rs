//! Project weekly-recurring events into a 7-day window.
//!
//! A recurring opening is a rule: the stored `starts_at..ends_at` is the anchor
//! occurrence and every later occurrence is the anchor shifted by whole periods.
//! Projection is closed-form arithmetic on that rule; nothing is iterated or
//! mutated per event.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::event::Event;
use crate::slots::{start_of_day, step_seconds};

/// Length of the availability window and of the recurrence period.
pub const DAYS_PER_WEEK: i64 = 7;

/// A half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// The week `[start, start + 7 days)`.
    ///
    /// # Errors
    /// Returns `SlotError::OutOfRange` if the week ends past the last
    /// representable instant.
    pub fn starting_at(start: DateTime<Utc>) -> Result<Self> {
        let end = start
            .checked_add_signed(Duration::days(DAYS_PER_WEEK))
            .ok_or_else(|| SlotError::OutOfRange(format!("week starting at {}", start)))?;
        Ok(Self { start, end })
    }

    /// The week from midnight UTC on `date` to midnight seven days later.
    ///
    /// # Errors
    /// Returns `SlotError::OutOfRange` for dates in the last week of the
    /// representable calendar.
    pub fn week_from(date: NaiveDate) -> Result<Self> {
        Self::starting_at(start_of_day(date))
    }

    /// Whether `occurrence` lies entirely inside the window. Ending exactly at
    /// `end` counts as inside.
    pub fn contains(&self, occurrence: &Occurrence) -> bool {
        self.start <= occurrence.starts_at && occurrence.ends_at <= self.end
    }

    /// The occurrence of `event` this window sees, if any.
    ///
    /// - Weekly-recurring openings are projected forward to their first occurrence
    ///   starting on or after `start`. The projected end may run past `end` when
    ///   the occurrence starts late in the week.
    /// - Everything else is returned unchanged only when it lies entirely inside
    ///   the window. Events that start before the window, or end after it, yield
    ///   `None` even if they partly overlap it.
    ///
    /// # Errors
    /// Returns `SlotError::OutOfRange` if projecting a recurring opening runs past
    /// the last representable instant.
    pub fn occurrence_of(&self, event: &Event) -> Result<Option<Occurrence>> {
        let occurrence = Occurrence::from(event);
        if event.is_recurring() {
            RecurrenceRule::weekly(occurrence)
                .occurrence_on_or_after(self.start)
                .map(Some)
        } else if self.contains(&occurrence) {
            Ok(Some(occurrence))
        } else {
            Ok(None)
        }
    }
}

/// One concrete `starts_at..ends_at` occurrence of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Occurrence {
    /// # Errors
    /// Returns `SlotError::OutOfRange` if either end leaves the representable range.
    pub fn shifted(&self, by: Duration) -> Result<Self> {
        let shift = |instant: DateTime<Utc>| {
            instant
                .checked_add_signed(by)
                .ok_or_else(|| SlotError::OutOfRange(format!("{} shifted by {}", instant, by)))
        };
        Ok(Self {
            starts_at: shift(self.starts_at)?,
            ends_at: shift(self.ends_at)?,
        })
    }
}

impl From<&Event> for Occurrence {
    fn from(event: &Event) -> Self {
        Self {
            starts_at: event.starts_at,
            ends_at: event.ends_at,
        }
    }
}

/// An anchor occurrence repeated every `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceRule {
    anchor: Occurrence,
    period: Duration,
}

impl RecurrenceRule {
    /// # Errors
    /// Returns `SlotError::InvalidDuration` unless `period` is a positive whole
    /// number of seconds.
    pub fn new(anchor: Occurrence, period: Duration) -> Result<Self> {
        step_seconds(period)?;
        Ok(Self { anchor, period })
    }

    pub fn weekly(anchor: Occurrence) -> Self {
        Self {
            anchor,
            period: Duration::days(DAYS_PER_WEEK),
        }
    }

    pub fn anchor(&self) -> Occurrence {
        self.anchor
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// The first occurrence starting at or after `instant`.
    ///
    /// The series begins at the anchor: an anchor already at or after `instant` is
    /// returned as-is, never shifted backwards. Otherwise the anchor moves forward
    /// by the smallest whole number of periods that reaches `instant`, so the
    /// result starts in `[instant, instant + period)`.
    ///
    /// # Errors
    /// Returns `SlotError::OutOfRange` if that occurrence lies past the last
    /// representable instant.
    pub fn occurrence_on_or_after(&self, instant: DateTime<Utc>) -> Result<Occurrence> {
        if self.anchor.starts_at >= instant {
            return Ok(self.anchor);
        }

        let period_seconds = step_seconds(self.period)?;
        let shift_by = |periods: i64| {
            periods
                .checked_mul(period_seconds)
                .and_then(Duration::try_seconds)
                .ok_or_else(|| {
                    SlotError::OutOfRange(format!("{} periods of {}", periods, self.period))
                })
                .and_then(|by| self.anchor.shifted(by))
        };

        let gap_seconds = (instant - self.anchor.starts_at).num_seconds();
        let periods = gap_seconds / period_seconds;
        let occurrence = shift_by(periods)?;
        if occurrence.starts_at < instant {
            return shift_by(periods + 1);
        }
        Ok(occurrence)
    }
}

/// Find the occurrence of `event` within `[window_start, window_start + 7 days)`.
///
/// See [`Window::occurrence_of`] for how recurring and one-off events differ.
///
/// # Errors
/// Returns `SlotError::OutOfRange` if the window or the projection runs past the
/// last representable instant.
pub fn occurrence_in_window(
    event: &Event,
    window_start: DateTime<Utc>,
) -> Result<Option<Occurrence>> {
    Window::starting_at(window_start)?.occurrence_of(event)
}
