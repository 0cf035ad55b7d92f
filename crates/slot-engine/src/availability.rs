//! Weekly availability: opening slots minus busy slots.
//!
//! Openings are projected into the query week and discretized into slots;
//! appointments are discretized as-is. A slot is available when some opening
//! produces it and no appointment produces the same start instant. Comparison is
//! by exact slot start, so an appointment covering only part of a slot does not
//! remove it.

use std::collections::{BTreeSet, HashSet};

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::config::AvailabilityConfig;
use crate::error::Result;
use crate::event::{Event, EventKind};
use crate::recurrence::Window;
use crate::schedule::{render, Schedule};
use crate::slots::{get_slots, Slot};
use crate::source::EventSource;

/// Computes schedules with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityEngine {
    config: AvailabilityConfig,
}

impl AvailabilityEngine {
    /// # Errors
    /// Returns `SlotError::Config` if the configuration is invalid.
    pub fn new(config: AvailabilityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AvailabilityConfig {
        &self.config
    }

    /// The 7-day schedule starting on `start_date`.
    ///
    /// Fetches openings and appointments from `source`, subtracts busy slots from
    /// opening slots, and renders the result for `start_date ..= start_date + 6 days`.
    ///
    /// # Errors
    /// Propagates `source` errors, returns `SlotError::InvalidRange` for any event
    /// that ends before it starts, and `SlotError::OutOfRange` when the week ends
    /// past the last representable date.
    pub fn availabilities<S>(&self, source: &S, start_date: NaiveDate) -> Result<Schedule>
    where
        S: EventSource + ?Sized,
    {
        let openings = source.fetch(EventKind::Opening)?;
        let appointments = source.fetch(EventKind::Appointment)?;
        debug!(
            %start_date,
            openings = openings.len(),
            appointments = appointments.len(),
            "computing availabilities"
        );

        let window = Window::week_from(start_date)?;
        let available = available_slots(
            &openings,
            &appointments,
            &window,
            self.config.slot_duration(),
        )?;

        render(start_date, window.end.date_naive(), &available)
    }
}

/// The 7-day schedule starting on `start_date`, in 30-minute slots.
///
/// # Errors
/// See [`AvailabilityEngine::availabilities`].
pub fn availabilities<S>(source: &S, start_date: NaiveDate) -> Result<Schedule>
where
    S: EventSource + ?Sized,
{
    AvailabilityEngine::default().availabilities(source, start_date)
}

/// Opening slots seen by `window`, minus every appointment slot.
///
/// Openings contribute only their occurrence in the window (see
/// [`Window::occurrence_of`]). Appointments are never filtered by the window.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` for a non-positive `slot_duration` and
/// `SlotError::InvalidRange` for an event that ends before it starts.
/// Projections past the representable range give `SlotError::OutOfRange`.
pub fn available_slots(
    openings: &[Event],
    appointments: &[Event],
    window: &Window,
    slot_duration: Duration,
) -> Result<BTreeSet<Slot>> {
    let mut open = BTreeSet::new();
    for opening in openings {
        opening.validate()?;
        if let Some(occurrence) = window.occurrence_of(opening)? {
            open.extend(get_slots(occurrence.starts_at, occurrence.ends_at, slot_duration)?);
        }
    }

    let mut busy = HashSet::new();
    for appointment in appointments {
        appointment.validate()?;
        busy.extend(get_slots(appointment.starts_at, appointment.ends_at, slot_duration)?);
    }

    let opening_slots = open.len();
    open.retain(|slot| !busy.contains(slot));
    debug!(
        opening_slots,
        busy_slots = busy.len(),
        available_slots = open.len(),
        "subtracted busy slots"
    );

    Ok(open)
}
