//! # slot-engine
//!
//! Weekly appointment availability for booking applications.
//!
//! Given opening hours (one-off or weekly-recurring) and booked appointments, the
//! engine produces a 7-day schedule of free slots. Every step is a pure function
//! over in-memory records: the same events and start date always yield the same
//! schedule.
//!
//! ## Modules
//!
//! - [`slots`] — split a time range into fixed-size slot start instants
//! - [`recurrence`] — project a weekly-recurring event into a 7-day window
//! - [`availability`] — opening slots minus busy slots
//! - [`schedule`] — group slots by day over a blank 7-day template
//! - [`event`] — the opening/appointment record the engine reads
//! - [`source`] — the storage port events are fetched through
//! - [`config`] — engine settings (slot length)
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod error;
pub mod event;
pub mod recurrence;
pub mod schedule;
pub mod slots;
pub mod source;

pub use availability::{availabilities, available_slots, AvailabilityEngine};
pub use config::AvailabilityConfig;
pub use error::SlotError;
pub use event::{Event, EventKind};
pub use recurrence::{occurrence_in_window, Occurrence, RecurrenceRule, Window};
pub use schedule::{render, DaySchedule, Schedule};
pub use slots::{get_slots, Slot};
pub use source::{EventSource, InMemoryEvents};
