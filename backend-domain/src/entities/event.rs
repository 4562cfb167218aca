// Event entity
// An event hosted by the institute, with its seat configuration and location

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::capacity::Capacity;
use crate::value_objects::{EventId, EventTypeId, PersonRef};

/// Label used for the house itself in rendered inhouse locations.
pub const INHOUSE_SITE_LABEL: &str = "MPI";

/// Where an event takes place. Inhouse and external fields are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventLocation {
    Inhouse {
        /// Name of a registered inhouse location.
        #[serde(default)]
        room: Option<String>,
    },
    External {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        building: Option<String>,
        #[serde(default)]
        room: Option<String>,
        /// Contact details at the venue (name, phone, email).
        #[serde(default)]
        contact: Option<String>,
    },
}

impl Default for EventLocation {
    fn default() -> Self {
        EventLocation::Inhouse { room: None }
    }
}

impl EventLocation {
    pub fn is_inhouse(&self) -> bool {
        matches!(self, EventLocation::Inhouse { .. })
    }

    /// Full location as a single line, e.g. `"MPI, Room 245"` or
    /// `"Conference Center, Hall B, Main Street 1, Jane Doe"`.
    pub fn full(&self) -> String {
        let (site, room) = match self {
            EventLocation::Inhouse { room } => (INHOUSE_SITE_LABEL, room.as_deref()),
            EventLocation::External { name, room, .. } => {
                (name.as_deref().unwrap_or_default(), room.as_deref())
            }
        };
        let location_and_room = format!("{}, {}", site, room.unwrap_or_default());

        let mut building_and_contact = String::new();
        if let EventLocation::External {
            building, contact, ..
        } = self
        {
            if let Some(building) = building.as_deref().filter(|value| !value.is_empty()) {
                building_and_contact.push_str(building);
            }
            if let Some(contact) = contact.as_deref().filter(|value| !value.is_empty()) {
                if !building_and_contact.is_empty() {
                    building_and_contact.push_str(", ");
                }
                building_and_contact.push_str(contact);
            }
        }

        if building_and_contact.trim().is_empty() {
            location_and_room
        } else {
            format!("{}, {}", location_and_room, building_and_contact)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unset until the event has been persisted for the first time.
    #[serde(default)]
    pub id: Option<EventId>,
    pub title: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub event_type: EventTypeId,
    #[serde(default)]
    pub speakers: Vec<PersonRef>,
    #[serde(default)]
    pub topic: Option<String>,
    /// Inclusive.
    pub start_date: DateTime<Utc>,
    /// Inclusive.
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub person_in_charge: Option<String>,
    #[serde(default)]
    pub location: EventLocation,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub casy_ref: i64,
    #[serde(default)]
    pub seats_available: Option<i32>,
    #[serde(default)]
    pub seats_for_internals_only: Option<i32>,
}

fn default_true() -> bool {
    true
}

impl Event {
    pub fn capacity(&self) -> Capacity {
        Capacity::new(self.seats_available, self.seats_for_internals_only)
    }

    pub fn location_full(&self) -> String {
        self.location.full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inhouse_location_renders_site_and_room() {
        let location = EventLocation::Inhouse {
            room: Some("Room 245".to_string()),
        };
        assert_eq!(location.full(), "MPI, Room 245");
        assert!(location.is_inhouse());
    }

    #[test]
    fn external_location_appends_building_and_contact() {
        let location = EventLocation::External {
            name: Some("Conference Center".to_string()),
            building: Some("Main Street 1".to_string()),
            room: Some("Hall B".to_string()),
            contact: Some("Jane Doe".to_string()),
        };
        assert_eq!(
            location.full(),
            "Conference Center, Hall B, Main Street 1, Jane Doe"
        );
    }

    #[test]
    fn external_location_skips_empty_parts() {
        let location = EventLocation::External {
            name: Some("Campus".to_string()),
            building: Some(String::new()),
            room: Some("A1".to_string()),
            contact: Some("desk@campus.example".to_string()),
        };
        assert_eq!(location.full(), "Campus, A1, desk@campus.example");

        let bare = EventLocation::External {
            name: Some("Campus".to_string()),
            building: None,
            room: None,
            contact: None,
        };
        assert_eq!(bare.full(), "Campus, ");
    }

    #[test]
    fn location_deserializes_from_tagged_json() {
        let location: EventLocation =
            serde_json::from_str(r#"{"kind":"external","name":"Hub","room":"2"}"#)
                .expect("parse location");
        assert_eq!(location.full(), "Hub, 2");
        assert!(!location.is_inhouse());
    }
}
