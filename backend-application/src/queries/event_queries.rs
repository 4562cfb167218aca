use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{AppError, AppState};
use backend_domain::{Event, EventId};

/// By default only upcoming, active events are listed.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EventListQuery {
    #[serde(default)]
    pub include_past: bool,
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn list_events(
    state: &AppState,
    query: EventListQuery,
    now: DateTime<Utc>,
) -> Result<Vec<Event>, AppError> {
    let mut events = state
        .event_repo
        .list_events()
        .await?
        .into_iter()
        .filter(|event| query.include_past || event.start_date >= now)
        .filter(|event| query.include_inactive || event.is_active)
        .collect::<Vec<_>>();
    events.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    Ok(events)
}

pub async fn get_event(state: &AppState, id: EventId) -> Result<Event, AppError> {
    state
        .event_repo
        .find_event(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", id)))
}
