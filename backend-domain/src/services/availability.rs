// Seat availability derived from capacity and the reservation ledger.
//
// Overbooked and waiting look at confirmed reservations only, while available
// counts every reservation of a pool, so a waiting registrant holds a seat.

use serde::Serialize;

use crate::entities::{PoolCounts, ReservationLedger};
use crate::error::CapacityError;
use crate::services::capacity::Capacity;
use crate::value_objects::ReservationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolAvailability {
    pub kind: ReservationKind,
    pub capacity: i64,
    pub counts: PoolCounts,
}

impl PoolAvailability {
    pub fn evaluate(
        capacity: &Capacity,
        ledger: &ReservationLedger,
        kind: ReservationKind,
    ) -> Result<Self, CapacityError> {
        Ok(Self {
            kind,
            capacity: capacity.for_kind(kind)?,
            counts: ledger.counts(kind),
        })
    }

    pub fn is_overbooked(&self) -> bool {
        to_i64(self.counts.confirmed) > self.capacity
    }

    pub fn is_waiting(&self) -> bool {
        self.counts.unconfirmed > 0 && to_i64(self.counts.confirmed) < self.capacity
    }

    pub fn is_available(&self) -> bool {
        self.capacity > to_i64(self.counts.total())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityStatus {
    pub overbooked: bool,
    pub waiting: bool,
    pub available: bool,
}

/// Evaluates both pools. Fails when either pool's capacity is undefined.
pub fn evaluate_pools(
    capacity: &Capacity,
    ledger: &ReservationLedger,
) -> Result<[PoolAvailability; 2], CapacityError> {
    Ok([
        PoolAvailability::evaluate(capacity, ledger, ReservationKind::Internal)?,
        PoolAvailability::evaluate(capacity, ledger, ReservationKind::External)?,
    ])
}

pub fn evaluate_availability(
    capacity: &Capacity,
    ledger: &ReservationLedger,
) -> Result<AvailabilityStatus, CapacityError> {
    let pools = evaluate_pools(capacity, ledger)?;
    Ok(AvailabilityStatus {
        overbooked: pools.iter().any(PoolAvailability::is_overbooked),
        waiting: pools.iter().any(PoolAvailability::is_waiting),
        available: pools.iter().any(PoolAvailability::is_available),
    })
}

pub fn is_overbooked(capacity: &Capacity, ledger: &ReservationLedger) -> Result<bool, CapacityError> {
    evaluate_availability(capacity, ledger).map(|status| status.overbooked)
}

pub fn is_waiting(capacity: &Capacity, ledger: &ReservationLedger) -> Result<bool, CapacityError> {
    evaluate_availability(capacity, ledger).map(|status| status.waiting)
}

pub fn is_available(capacity: &Capacity, ledger: &ReservationLedger) -> Result<bool, CapacityError> {
    evaluate_availability(capacity, ledger).map(|status| status.available)
}

fn to_i64(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
