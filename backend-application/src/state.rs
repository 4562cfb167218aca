use std::sync::Arc;

use backend_domain::ports::{CatalogRepository, EventRepository, ReservationRepository};
use backend_domain::RuntimeConfig;

use crate::dispatcher::NotificationDispatcher;
use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_repo: Arc<dyn EventRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub metrics: Arc<Metrics>,
}
