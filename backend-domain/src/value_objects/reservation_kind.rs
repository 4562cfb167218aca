// Reservation kind value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which seat pool a reservation draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationKind {
    Internal,
    External,
}

impl ReservationKind {
    pub const ALL: [ReservationKind; 2] = [ReservationKind::Internal, ReservationKind::External];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationKind::Internal => "internal",
            ReservationKind::External => "external",
        }
    }
}

impl fmt::Display for ReservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "internal" => Ok(ReservationKind::Internal),
            "external" => Ok(ReservationKind::External),
            other => Err(anyhow::anyhow!("unknown reservation kind '{}'", other)),
        }
    }
}
