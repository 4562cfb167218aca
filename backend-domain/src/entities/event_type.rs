// Event type entity
// Sets which registrations an event accepts and which optional fields it carries

use serde::{Deserialize, Serialize};

use crate::value_objects::{EventTypeId, ReservationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: EventTypeId,
    pub name: String,
    pub title: String,
    pub is_active: bool,
    pub allow_internal_registrations: bool,
    pub allow_external_registrations: bool,
    pub has_speakers: bool,
    pub has_topic: bool,
}

impl EventType {
    pub fn allows(&self, kind: ReservationKind) -> bool {
        match kind {
            ReservationKind::Internal => self.allow_internal_registrations,
            ReservationKind::External => self.allow_external_registrations,
        }
    }
}

/// Options an editor needs to know about an event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeOptions {
    pub allow_internal_registrations: bool,
    pub allow_external_registrations: bool,
    pub has_speakers: bool,
    pub has_topic: bool,
}

impl Default for EventTypeOptions {
    fn default() -> Self {
        Self {
            allow_internal_registrations: true,
            allow_external_registrations: true,
            has_speakers: false,
            has_topic: false,
        }
    }
}

impl From<&EventType> for EventTypeOptions {
    fn from(event_type: &EventType) -> Self {
        Self {
            allow_internal_registrations: event_type.allow_internal_registrations,
            allow_external_registrations: event_type.allow_external_registrations,
            has_speakers: event_type.has_speakers,
            has_topic: event_type.has_topic,
        }
    }
}
