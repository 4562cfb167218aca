// Seat status value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Confirmed,
    Waiting,
}

impl SeatStatus {
    pub fn from_confirmed(is_confirmed: bool) -> Self {
        if is_confirmed {
            SeatStatus::Confirmed
        } else {
            SeatStatus::Waiting
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Confirmed => "Confirmed",
            SeatStatus::Waiting => "Waiting",
        }
    }
}
