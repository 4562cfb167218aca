use tracing::error;

use crate::{AppError, AppState};
use backend_domain::{EventTypeId, EventTypeOptions};

/// Options of an event type; unknown types fall back to the defaults.
pub async fn event_type_options(
    state: &AppState,
    id: EventTypeId,
) -> Result<EventTypeOptions, AppError> {
    let event_type = state
        .catalog_repo
        .find_event_type(id)
        .await
        .map_err(|err| {
            error!("failed to fetch event type {}: {}", id, err);
            AppError::Internal(err)
        })?;
    Ok(event_type
        .as_ref()
        .map(EventTypeOptions::from)
        .unwrap_or_default())
}
