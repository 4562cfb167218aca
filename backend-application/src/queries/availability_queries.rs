use serde::Serialize;
use tracing::error;

use crate::{AppError, AppState};
use backend_domain::{
    evaluate_availability, AvailabilityStatus, EventId, PoolAvailability, ReservationKind,
    ReservationLedger,
};

#[derive(Debug, Clone, Serialize)]
pub struct EventAvailability {
    pub event_id: EventId,
    pub internal_capacity: Option<i64>,
    pub external_capacity: Option<i64>,
    /// Pools whose capacity is configured.
    pub pools: Vec<PoolAvailability>,
    /// `None` means unknown: the seat totals are not configured.
    pub status: Option<AvailabilityStatus>,
}

pub async fn event_availability(
    state: &AppState,
    event_id: EventId,
) -> Result<EventAvailability, AppError> {
    let event = state
        .event_repo
        .find_event(event_id)
        .await
        .map_err(|err| {
            error!("failed to fetch event {}: {}", event_id, err);
            AppError::Internal(err)
        })?
        .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;
    let ledger: ReservationLedger = state
        .reservation_repo
        .list_reservations(event_id)
        .await
        .map_err(|err| {
            error!("failed to fetch reservations of event {}: {}", event_id, err);
            AppError::Internal(err)
        })?
        .into_iter()
        .collect();

    let capacity = event.capacity();
    let pools = ReservationKind::ALL
        .into_iter()
        .filter_map(|kind| PoolAvailability::evaluate(&capacity, &ledger, kind).ok())
        .collect();

    Ok(EventAvailability {
        event_id,
        internal_capacity: capacity.internal().ok(),
        external_capacity: capacity.external().ok(),
        pools,
        status: evaluate_availability(&capacity, &ledger).ok(),
    })
}
