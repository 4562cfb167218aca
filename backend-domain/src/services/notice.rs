// Notification wording and reservation lifecycle classification

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{Person, Reservation};
use crate::services::change_detector::EventChange;
use crate::value_objects::SeatStatus;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum ReservationNotice {
    Created { status: SeatStatus },
    StatusChanged { status: SeatStatus },
    Deleted,
}

impl ReservationNotice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationNotice::Created { .. } => "created",
            ReservationNotice::StatusChanged { .. } => "status_changed",
            ReservationNotice::Deleted => "deleted",
        }
    }

    pub fn text(&self) -> String {
        match self {
            ReservationNotice::Created { status } => {
                format!("You have new registration with status {}", status.as_str())
            }
            ReservationNotice::StatusChanged { status } => format!(
                "Status of your registration has been changed to {}",
                status.as_str()
            ),
            ReservationNotice::Deleted => "Your registration has been deleted".to_string(),
        }
    }
}

/// Notice for a reservation about to be saved. Updates only notify when the
/// confirmation flag actually flipped.
pub fn detect_reservation_change(
    previous: Option<&Reservation>,
    proposed: &Reservation,
) -> Option<ReservationNotice> {
    match previous {
        None => Some(ReservationNotice::Created {
            status: proposed.seat_status(),
        }),
        Some(previous) if previous.is_confirmed != proposed.is_confirmed => {
            Some(ReservationNotice::StatusChanged {
                status: proposed.seat_status(),
            })
        }
        Some(_) => None,
    }
}

pub fn event_change_text(change: &EventChange) -> String {
    match change {
        EventChange::DatesChanged { start, end } => format!(
            "Dates of the event have been changed to: {} - {}",
            format_date(start),
            format_date(end)
        ),
        EventChange::Activated => "This event will be performed".to_string(),
        EventChange::Canceled => "This event has been canceled".to_string(),
        EventChange::LocationChanged { location } => {
            format!("Location of the event has been changed to: {}", location)
        }
    }
}

/// Salutation line followed by the notice text.
pub fn compose_message(person: &Person, text: &str) -> String {
    format!("{}\n{}", person.salutation_line(), text)
}

fn format_date(value: &DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}
