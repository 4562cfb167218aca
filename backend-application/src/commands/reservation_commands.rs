use serde::Serialize;
use tracing::info;

use crate::commands::event_commands::accepts_registrations;
use crate::dispatcher::DispatchOutcome;
use crate::{AppError, AppState};
use backend_domain::{
    detect_reservation_change, Event, EventType, Reservation, ReservationId, ReservationNotice,
};

#[derive(Debug, Clone, Serialize)]
pub struct ReservationOutcome {
    pub reservation: Reservation,
    pub notice: Option<ReservationNotice>,
    pub notifications: DispatchOutcome,
}

pub async fn create_reservation(
    state: &AppState,
    mut reservation: Reservation,
) -> Result<ReservationOutcome, AppError> {
    if reservation.id.is_some() {
        return Err(AppError::BadRequest(
            "a new reservation must not carry an id".to_string(),
        ));
    }
    let (event, event_type) = load_event(state, &reservation).await?;
    if !accepts_registrations(&event, &event_type, reservation.kind) {
        return Err(AppError::BadRequest(format!(
            "event {} does not accept {} registrations",
            reservation.event_id, reservation.kind
        )));
    }
    reservation.comment = reservation.comment.trim().to_string();

    let notice = detect_reservation_change(None, &reservation);
    let saved = state.reservation_repo.save_reservation(reservation).await?;
    finish(state, saved, notice).await
}

/// Stores a changed reservation. Only a flipped confirmation flag notifies.
pub async fn update_reservation(
    state: &AppState,
    mut reservation: Reservation,
) -> Result<ReservationOutcome, AppError> {
    let id = reservation
        .id
        .ok_or_else(|| AppError::BadRequest("reservation id is required".to_string()))?;
    let previous = find_reservation(state, id).await?;
    if previous.event_id != reservation.event_id {
        return Err(AppError::BadRequest(format!(
            "reservation {} cannot move from event {} to event {}",
            id, previous.event_id, reservation.event_id
        )));
    }
    if previous.kind != reservation.kind {
        return Err(AppError::BadRequest(format!(
            "reservation {} cannot change from {} to {}",
            id, previous.kind, reservation.kind
        )));
    }
    reservation.comment = reservation.comment.trim().to_string();

    let notice = detect_reservation_change(Some(&previous), &reservation);
    let saved = state.reservation_repo.save_reservation(reservation).await?;
    finish(state, saved, notice).await
}

pub async fn delete_reservation(
    state: &AppState,
    id: ReservationId,
) -> Result<ReservationOutcome, AppError> {
    let reservation = find_reservation(state, id).await?;
    state.reservation_repo.delete_reservation(id).await?;
    finish(state, reservation, Some(ReservationNotice::Deleted)).await
}

async fn finish(
    state: &AppState,
    reservation: Reservation,
    notice: Option<ReservationNotice>,
) -> Result<ReservationOutcome, AppError> {
    state.metrics.record_reservation_changed();
    info!(
        "reservation {} of event {}: notice={}",
        reservation.id.map(|id| id.to_string()).unwrap_or_default(),
        reservation.event_id,
        notice.as_ref().map(ReservationNotice::as_str).unwrap_or("none")
    );
    let notifications = match &notice {
        Some(notice) => {
            state
                .dispatcher
                .dispatch_reservation_notice(&reservation, notice)
                .await
        }
        None => DispatchOutcome::default(),
    };
    Ok(ReservationOutcome {
        reservation,
        notice,
        notifications,
    })
}

async fn find_reservation(state: &AppState, id: ReservationId) -> Result<Reservation, AppError> {
    state
        .reservation_repo
        .find_reservation(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("reservation {}", id)))
}

async fn load_event(
    state: &AppState,
    reservation: &Reservation,
) -> Result<(Event, EventType), AppError> {
    let event = state
        .event_repo
        .find_event(reservation.event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", reservation.event_id)))?;
    let event_type = state
        .catalog_repo
        .find_event_type(event.event_type)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event type {}", event.event_type)))?;
    Ok((event, event_type))
}
