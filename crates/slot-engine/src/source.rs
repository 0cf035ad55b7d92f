//! The storage port events are fetched through.
//!
//! The engine never writes events. Any persistence layer can back it by
//! implementing [`EventSource`]; [`InMemoryEvents`] serves tests and the CLI.

use crate::error::{Result, SlotError};
use crate::event::{Event, EventKind};

/// Read-only query over stored events.
pub trait EventSource {
    /// All stored events of the given kind.
    fn fetch(&self, kind: EventKind) -> Result<Vec<Event>>;
}

/// Events held in a `Vec`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryEvents {
    events: Vec<Event>,
}

impl InMemoryEvents {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Load a JSON array of events, e.g.
    /// `[{"kind":"opening","starts_at":"2014-08-04T09:30:00Z","ends_at":"2014-08-04T12:30:00Z","weekly_recurring":true}]`.
    ///
    /// # Errors
    /// Returns `SlotError::Source` if the JSON does not describe a list of events.
    pub fn from_json(json: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(json)
            .map_err(|e| SlotError::Source(format!("Invalid events JSON: {}", e)))?;
        Ok(Self::new(events))
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl EventSource for InMemoryEvents {
    fn fetch(&self, kind: EventKind) -> Result<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect())
    }
}
