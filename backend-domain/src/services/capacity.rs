use crate::error::CapacityError;
use crate::value_objects::ReservationKind;

/// Seat totals of an event. Either value may be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capacity {
    pub seats_available: Option<i32>,
    pub seats_for_internals_only: Option<i32>,
}

impl Capacity {
    pub fn new(seats_available: Option<i32>, seats_for_internals_only: Option<i32>) -> Self {
        Self {
            seats_available,
            seats_for_internals_only,
        }
    }

    pub fn internal(&self) -> Result<i64, CapacityError> {
        self.seats_for_internals_only
            .map(i64::from)
            .ok_or(CapacityError::CapacityUndefined)
    }

    /// Total minus the internal quota. Negative when the quota exceeds the total.
    pub fn external(&self) -> Result<i64, CapacityError> {
        match (self.seats_available, self.seats_for_internals_only) {
            (Some(total), Some(internal)) => Ok(i64::from(total) - i64::from(internal)),
            _ => Err(CapacityError::CapacityUndefined),
        }
    }

    pub fn for_kind(&self, kind: ReservationKind) -> Result<i64, CapacityError> {
        match kind {
            ReservationKind::Internal => self.internal(),
            ReservationKind::External => self.external(),
        }
    }
}
