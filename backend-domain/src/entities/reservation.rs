// Reservation entity
// A seat booked by a registrant, drawn from the internal or external pool

use serde::{Deserialize, Serialize};

use crate::value_objects::{EventId, PersonRef, ReservationId, ReservationKind, SeatStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<ReservationId>,
    pub event_id: EventId,
    pub kind: ReservationKind,
    pub casy_ref: PersonRef,
    /// `false` puts the registrant on the waiting list.
    #[serde(default = "default_confirmed")]
    pub is_confirmed: bool,
    #[serde(default)]
    pub comment: String,
}

fn default_confirmed() -> bool {
    true
}

impl Reservation {
    pub fn new(event_id: EventId, kind: ReservationKind, casy_ref: PersonRef) -> Self {
        Self {
            id: None,
            event_id,
            kind,
            casy_ref,
            is_confirmed: true,
            comment: String::new(),
        }
    }

    pub fn seat_status(&self) -> SeatStatus {
        SeatStatus::from_confirmed(self.is_confirmed)
    }
}

/// Confirmed and waiting counts of one seat pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PoolCounts {
    pub confirmed: usize,
    pub unconfirmed: usize,
}

impl PoolCounts {
    pub fn total(&self) -> usize {
        self.confirmed + self.unconfirmed
    }
}

/// All reservations attached to one event.
#[derive(Debug, Clone, Default)]
pub struct ReservationLedger {
    reservations: Vec<Reservation>,
}

impl ReservationLedger {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        Self { reservations }
    }

    pub fn of_kind(&self, kind: ReservationKind) -> impl Iterator<Item = &Reservation> {
        self.reservations
            .iter()
            .filter(move |reservation| reservation.kind == kind)
    }

    pub fn counts(&self, kind: ReservationKind) -> PoolCounts {
        self.of_kind(kind)
            .fold(PoolCounts::default(), |mut counts, reservation| {
                if reservation.is_confirmed {
                    counts.confirmed += 1;
                } else {
                    counts.unconfirmed += 1;
                }
                counts
            })
    }

    /// Internal reservations first, then external ones.
    pub fn in_dispatch_order(&self) -> impl Iterator<Item = &Reservation> {
        ReservationKind::ALL
            .into_iter()
            .flat_map(move |kind| self.of_kind(kind))
    }
}

impl FromIterator<Reservation> for ReservationLedger {
    fn from_iter<T: IntoIterator<Item = Reservation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
