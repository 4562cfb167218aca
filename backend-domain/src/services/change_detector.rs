// Classifies an event update into the one notification category it triggers

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::Event;

/// The persisted fields an update is compared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSnapshot {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub location: String,
}

impl From<&Event> for EventSnapshot {
    fn from(event: &Event) -> Self {
        Self {
            start_date: event.start_date,
            end_date: event.end_date,
            is_active: event.is_active,
            location: event.location_full(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum EventChange {
    DatesChanged {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    Activated,
    Canceled,
    LocationChanged {
        location: String,
    },
}

impl EventChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventChange::DatesChanged { .. } => "dates_changed",
            EventChange::Activated => "activated",
            EventChange::Canceled => "canceled",
            EventChange::LocationChanged { .. } => "location_changed",
        }
    }
}

/// First match wins: dates, then activation, then location.
/// Creation (no previous snapshot) never classifies.
pub fn detect_event_change(
    previous: Option<&EventSnapshot>,
    proposed: &EventSnapshot,
) -> Option<EventChange> {
    let previous = previous?;
    if proposed.start_date != previous.start_date || proposed.end_date != previous.end_date {
        return Some(EventChange::DatesChanged {
            start: proposed.start_date,
            end: proposed.end_date,
        });
    }
    if proposed.is_active != previous.is_active {
        return Some(if proposed.is_active {
            EventChange::Activated
        } else {
            EventChange::Canceled
        });
    }
    if proposed.location != previous.location {
        return Some(EventChange::LocationChanged {
            location: proposed.location.clone(),
        });
    }
    None
}
