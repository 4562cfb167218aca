use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// Seat totals are not configured for the event; status is unknown.
    #[error("seat capacity is not configured")]
    CapacityUndefined,
}
