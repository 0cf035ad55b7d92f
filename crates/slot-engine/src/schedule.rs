//! Render available slots as a day-by-day schedule.
//!
//! A blank template built from one slot per day fixes the ordered list of dates.
//! Available slots are grouped by date separately and overlaid on the template,
//! so days without availability still appear, with an empty slot list.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::slots::{get_slots, start_of_day, Slot};

/// Free slots on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    /// Slot start times as `H:MM`, earliest first.
    pub slots: Vec<String>,
}

/// Consecutive days of availability, in date order.
///
/// Serializes as a bare array: `[{"date":"2014-08-10","slots":[]}, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    days: Vec<DaySchedule>,
}

impl Schedule {
    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn into_days(self) -> Vec<DaySchedule> {
        self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Total number of free slots across all days.
    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|d| d.slots.len()).sum()
    }
}

/// Group slots by calendar date, each day's labels sorted and deduplicated.
pub fn group_by_day<'a, I>(slots: I) -> BTreeMap<NaiveDate, Vec<String>>
where
    I: IntoIterator<Item = &'a Slot>,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<Slot>> = BTreeMap::new();
    for slot in slots {
        by_day.entry(slot.date()).or_default().push(*slot);
    }

    by_day
        .into_iter()
        .map(|(date, mut day_slots)| {
            day_slots.sort_unstable();
            day_slots.dedup();
            (date, day_slots.iter().map(Slot::label).collect())
        })
        .collect()
}

/// Build the schedule for `[start_date, end_date)` from the available slots.
///
/// Every date in the range appears exactly once, in order. Slots falling on
/// dates outside the range are dropped.
///
/// # Errors
/// Returns `SlotError::InvalidRange` if `end_date` is before `start_date`.
pub fn render<'a, I>(
    start_date: NaiveDate,
    end_date: NaiveDate,
    available_slots: I,
) -> Result<Schedule>
where
    I: IntoIterator<Item = &'a Slot>,
{
    let mut dates: Vec<NaiveDate> = get_slots(
        start_of_day(start_date),
        start_of_day(end_date),
        Duration::days(1),
    )?
    .iter()
    .map(Slot::date)
    .collect();
    dates.dedup();

    let mut by_day = group_by_day(available_slots);

    let days = dates
        .into_iter()
        .map(|date| DaySchedule {
            date,
            slots: by_day.remove(&date).unwrap_or_default(),
        })
        .collect();

    if !by_day.is_empty() {
        debug!(
            dropped_days = by_day.len(),
            "available slots outside the schedule range were dropped"
        );
    }

    Ok(Schedule { days })
}
