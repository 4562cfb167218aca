// Inhouse locations and speakers

use serde::{Deserialize, Serialize};

use crate::value_objects::{LocationId, PersonRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    /// Unique display name, e.g. "Room 245".
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub casy_ref: PersonRef,
    #[serde(default)]
    pub bio: String,
}
