use serde::Serialize;
use tracing::info;

use crate::dispatcher::DispatchOutcome;
use crate::{AppError, AppState};
use backend_domain::{
    detect_event_change, normalize_optional_text, Event, EventChange, EventLocation,
    EventSnapshot, EventType, ReservationKind, ReservationLedger, ReservationNotice,
};

#[derive(Debug, Clone, Serialize)]
pub struct EventSaveOutcome {
    pub event: Event,
    pub change: Option<EventChange>,
    /// Reservations removed because the event type no longer accepts them.
    pub purged_reservations: usize,
    pub notifications: DispatchOutcome,
}

/// Creates or updates an event. The previous snapshot is compared against the
/// normalized proposal and the resulting change, if any, is announced to every
/// remaining registrant once the event is stored.
pub async fn save_event(state: &AppState, proposed: Event) -> Result<EventSaveOutcome, AppError> {
    let mut event = normalize_event(proposed);
    validate_event(&event)?;

    let previous = match event.id {
        Some(id) => Some(
            state
                .event_repo
                .find_event(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("event {}", id)))?,
        ),
        None => None,
    };

    let event_type = state
        .catalog_repo
        .find_event_type(event.event_type)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("unknown event type {}", event.event_type)))?;
    let type_changed = previous
        .as_ref()
        .map_or(true, |previous| previous.event_type != event.event_type);
    if type_changed && !event_type.is_active {
        return Err(AppError::BadRequest(format!(
            "event type '{}' is not active",
            event_type.name
        )));
    }

    apply_type_options(state, &event_type, &mut event).await?;
    validate_location(state, &event.location).await?;

    let (ledger, purged) = match event.id {
        Some(id) => state
            .reservation_repo
            .list_reservations(id)
            .await?
            .into_iter()
            .partition::<Vec<_>, _>(|reservation| event_type.allows(reservation.kind)),
        None => (Vec::new(), Vec::new()),
    };
    let ledger = ReservationLedger::new(ledger);

    let previous_snapshot = previous.as_ref().map(EventSnapshot::from);
    let change = detect_event_change(previous_snapshot.as_ref(), &EventSnapshot::from(&event));

    let saved = state.event_repo.save_event(event).await?;
    state.metrics.record_event_saved();

    // Purged registrants get the deletion notice only, never the event change.
    let mut notifications = DispatchOutcome::default();
    let purged_reservations = purged.len();
    for reservation in &purged {
        if let Some(reservation_id) = reservation.id {
            state
                .reservation_repo
                .delete_reservation(reservation_id)
                .await?;
        }
        notifications = notifications.merge(
            state
                .dispatcher
                .dispatch_reservation_notice(reservation, &ReservationNotice::Deleted)
                .await,
        );
    }
    info!(
        "event {} saved: change={}, purged_reservations={}",
        saved.id.map(|id| id.to_string()).unwrap_or_default(),
        change.as_ref().map(EventChange::as_str).unwrap_or("none"),
        purged_reservations
    );

    if let Some(change) = &change {
        notifications = notifications.merge(
            state
                .dispatcher
                .dispatch_event_change(change, &ledger)
                .await,
        );
    }

    Ok(EventSaveOutcome {
        event: saved,
        change,
        purged_reservations,
        notifications,
    })
}

fn normalize_event(mut event: Event) -> Event {
    event.title = event.title.trim().to_string();
    event.topic = normalize_optional_text(event.topic);
    event.person_in_charge = normalize_optional_text(event.person_in_charge);
    event.short_description = normalize_optional_text(event.short_description);
    event.notes = normalize_optional_text(event.notes);
    event.location = match event.location {
        EventLocation::Inhouse { room } => EventLocation::Inhouse {
            room: normalize_optional_text(room),
        },
        EventLocation::External {
            name,
            building,
            room,
            contact,
        } => EventLocation::External {
            name: normalize_optional_text(name),
            building: normalize_optional_text(building),
            room: normalize_optional_text(room),
            contact: normalize_optional_text(contact),
        },
    };
    event.speakers.sort();
    event.speakers.dedup();
    event
}

fn validate_event(event: &Event) -> Result<(), AppError> {
    if event.title.is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }
    if event.start_date > event.end_date {
        return Err(AppError::BadRequest(
            "start_date must not be after end_date".to_string(),
        ));
    }
    for (field, value) in [
        ("seats_available", event.seats_available),
        ("seats_for_internals_only", event.seats_for_internals_only),
    ] {
        if value.is_some_and(|seats| seats < 0) {
            return Err(AppError::BadRequest(format!("{} must not be negative", field)));
        }
    }
    if let (Some(total), Some(internal)) = (event.seats_available, event.seats_for_internals_only)
    {
        if internal > total {
            return Err(AppError::BadRequest(format!(
                "seats_for_internals_only ({}) exceeds seats_available ({})",
                internal, total
            )));
        }
    }
    Ok(())
}

async fn apply_type_options(
    state: &AppState,
    event_type: &EventType,
    event: &mut Event,
) -> Result<(), AppError> {
    if !event_type.has_topic {
        event.topic = None;
    }
    if !event_type.has_speakers {
        event.speakers.clear();
        return Ok(());
    }
    for speaker in &event.speakers {
        if state.catalog_repo.find_speaker(*speaker).await?.is_none() {
            return Err(AppError::BadRequest(format!("unknown speaker {}", speaker)));
        }
    }
    Ok(())
}

async fn validate_location(state: &AppState, location: &EventLocation) -> Result<(), AppError> {
    if let EventLocation::Inhouse { room: Some(room) } = location {
        if state
            .catalog_repo
            .find_location_by_name(room)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!("unknown location '{}'", room)));
        }
    }
    Ok(())
}

/// Whether registrations of `kind` can currently be made for the event.
pub fn accepts_registrations(event: &Event, event_type: &EventType, kind: ReservationKind) -> bool {
    event.is_active && event_type.allows(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::reservation_commands::create_reservation;
    use std::sync::Arc;

    use crate::test_support::{
        day, harness, new_event, person, seminar_type, Directory, RejectingEventWrites,
    };
    use backend_domain::{EventId, EventTypeId, PersonRef, Reservation};

    fn directory() -> Directory {
        Directory::default()
            .with(person(1, Some("one@example.org")))
            .with(person(2, Some("two@example.org")))
            .with(person(3, Some("three@example.org")))
    }

    async fn seeded(
        h: &crate::test_support::Harness,
        registrants: &[(ReservationKind, i64)],
    ) -> Event {
        let created = save_event(&h.state, new_event()).await.expect("create event");
        let event_id = created.event.id.expect("event id");
        for (kind, person) in registrants {
            create_reservation(
                &h.state,
                Reservation::new(event_id, *kind, PersonRef(*person)),
            )
            .await
            .expect("create reservation");
        }
        created.event
    }

    #[tokio::test]
    async fn creation_assigns_id_and_sends_nothing() {
        let h = harness(directory(), vec![seminar_type()]);
        let outcome = save_event(&h.state, new_event()).await.expect("create");
        assert!(outcome.event.id.is_some());
        assert_eq!(outcome.change, None);
        assert!(h.sender.requests().is_empty());
    }

    #[tokio::test]
    async fn date_change_notifies_each_registrant_once() {
        let h = harness(directory(), vec![seminar_type()]);
        let mut event = seeded(
            &h,
            &[
                (ReservationKind::Internal, 1),
                (ReservationKind::External, 2),
                (ReservationKind::Internal, 3),
            ],
        )
        .await;
        let before = h.sender.requests().len();

        event.start_date = day(5);
        event.end_date = day(6);
        let outcome = save_event(&h.state, event).await.expect("update");

        assert_eq!(
            outcome.change,
            Some(EventChange::DatesChanged {
                start: day(5),
                end: day(6)
            })
        );
        assert_eq!(outcome.notifications.sent, 3);
        let messages = h.sender.messages();
        assert_eq!(messages.len() - before, 3);
        assert!(messages[before..]
            .iter()
            .all(|message| message.contains("Dates of the event have been changed to")));
    }

    #[tokio::test]
    async fn cancellation_with_date_change_only_reports_dates() {
        let h = harness(directory(), vec![seminar_type()]);
        let mut event = seeded(&h, &[(ReservationKind::Internal, 1)]).await;
        let before = h.sender.requests().len();

        event.is_active = false;
        event.start_date = day(1) + chrono::Duration::hours(2);
        let outcome = save_event(&h.state, event).await.expect("update");

        assert_eq!(outcome.change.as_ref().map(EventChange::as_str), Some("dates_changed"));
        let messages = h.sender.messages();
        assert_eq!(messages.len() - before, 1);
        assert!(!messages[before].contains("canceled"));
    }

    #[tokio::test]
    async fn location_change_carries_full_location() {
        let h = harness(directory(), vec![seminar_type()]);
        let mut event = seeded(&h, &[(ReservationKind::External, 2)]).await;

        event.location = EventLocation::Inhouse {
            room: Some("Room 101".to_string()),
        };
        let outcome = save_event(&h.state, event).await.expect("update");

        assert_eq!(
            outcome.change,
            Some(EventChange::LocationChanged {
                location: "MPI, Room 101".to_string()
            })
        );
        let messages = h.sender.messages();
        assert_eq!(
            messages.last().map(String::as_str),
            Some("Dr. First2 Last2\nLocation of the event has been changed to: MPI, Room 101")
        );
    }

    #[tokio::test]
    async fn resaving_unchanged_event_is_silent() {
        let h = harness(directory(), vec![seminar_type()]);
        let event = seeded(&h, &[(ReservationKind::Internal, 1)]).await;
        let before = h.sender.requests().len();

        let outcome = save_event(&h.state, event).await.expect("update");
        assert_eq!(outcome.change, None);
        assert_eq!(h.sender.requests().len(), before);
    }

    #[tokio::test]
    async fn type_without_external_registrations_purges_them() {
        let mut internal_only = seminar_type();
        internal_only.id = EventTypeId(2);
        internal_only.name = "colloquium".to_string();
        internal_only.allow_external_registrations = false;
        internal_only.has_topic = false;
        let h = harness(directory(), vec![seminar_type(), internal_only]);
        let mut event = seeded(
            &h,
            &[(ReservationKind::Internal, 1), (ReservationKind::External, 2)],
        )
        .await;
        let before = h.sender.requests().len();

        event.event_type = EventTypeId(2);
        event.is_active = false;
        let outcome = save_event(&h.state, event).await.expect("update");

        assert_eq!(outcome.purged_reservations, 1);
        assert_eq!(outcome.event.topic, None);
        assert_eq!(outcome.change, Some(EventChange::Canceled));
        let messages = h.sender.messages();
        assert_eq!(
            messages[before..].to_vec(),
            vec![
                "Dr. First2 Last2\nYour registration has been deleted".to_string(),
                "Dr. First1 Last1\nThis event has been canceled".to_string(),
            ]
        );
        let remaining = h
            .state
            .reservation_repo
            .list_reservations(outcome.event.id.expect("id"))
            .await
            .expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, ReservationKind::Internal);
    }

    #[tokio::test]
    async fn failed_write_keeps_reservations_and_sends_nothing() {
        let mut internal_only = seminar_type();
        internal_only.id = EventTypeId(2);
        internal_only.allow_external_registrations = false;
        let mut h = harness(directory(), vec![seminar_type(), internal_only]);
        let mut event = seeded(
            &h,
            &[(ReservationKind::Internal, 1), (ReservationKind::External, 2)],
        )
        .await;
        let event_id = event.id.expect("id");
        let before = h.sender.requests().len();
        h.state.event_repo = Arc::new(RejectingEventWrites(h.state.event_repo.clone()));

        event.event_type = EventTypeId(2);
        let result = save_event(&h.state, event).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(h.sender.requests().len(), before);
        let stored = h
            .state
            .event_repo
            .find_event(event_id)
            .await
            .expect("find")
            .expect("stored");
        assert_eq!(stored.event_type, EventTypeId(1));
        let remaining = h
            .state
            .reservation_repo
            .list_reservations(event_id)
            .await
            .expect("list");
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn rejects_internal_quota_above_total() {
        let h = harness(directory(), vec![seminar_type()]);
        let mut event = new_event();
        event.seats_for_internals_only = Some(12);
        let err = save_event(&h.state, event).await.expect_err("invalid seats");
        assert!(matches!(err, AppError::BadRequest(message) if message.contains("exceeds")));
    }

    #[tokio::test]
    async fn rejects_inverted_dates_and_unknown_rooms() {
        let h = harness(directory(), vec![seminar_type()]);
        let mut inverted = new_event();
        inverted.start_date = day(3);
        assert!(matches!(
            save_event(&h.state, inverted).await,
            Err(AppError::BadRequest(_))
        ));

        let mut unknown_room = new_event();
        unknown_room.location = EventLocation::Inhouse {
            room: Some("Basement".to_string()),
        };
        assert!(matches!(
            save_event(&h.state, unknown_room).await,
            Err(AppError::BadRequest(message)) if message.contains("Basement")
        ));
    }

    #[tokio::test]
    async fn inactive_type_cannot_be_chosen_for_new_events() {
        let mut retired = seminar_type();
        retired.is_active = false;
        let h = harness(directory(), vec![retired]);
        assert!(matches!(
            save_event(&h.state, new_event()).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn updating_missing_event_is_not_found() {
        let h = harness(directory(), vec![seminar_type()]);
        let mut event = new_event();
        event.id = Some(EventId(99));
        assert!(matches!(
            save_event(&h.state, event).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn speakers_are_checked_and_cleared_per_type() {
        let h = harness(directory(), vec![seminar_type()]);
        let mut event = new_event();
        event.speakers = vec![PersonRef(500), PersonRef(500)];
        let outcome = save_event(&h.state, event).await.expect("known speaker");
        assert_eq!(outcome.event.speakers, vec![PersonRef(500)]);

        let mut unknown = new_event();
        unknown.speakers = vec![PersonRef(501)];
        assert!(matches!(
            save_event(&h.state, unknown).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
