// Person entity
// A directory record as returned by the identity lookup

use serde::{Deserialize, Serialize};

use crate::value_objects::PersonRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub casy_ref: PersonRef,
    #[serde(default)]
    pub salutation: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Person {
    /// "Dr. Jane Doe"
    pub fn salutation_line(&self) -> String {
        [
            self.salutation.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
        ]
        .join(" ")
    }

    /// The contact address, if the record carries a usable one.
    pub fn contact_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}
