use async_trait::async_trait;

use crate::entities::{Event, EventType, Location, Reservation, Speaker};
use crate::value_objects::{EventId, EventTypeId, PersonRef, ReservationId};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_event(&self, id: EventId) -> anyhow::Result<Option<Event>>;
    async fn list_events(&self) -> anyhow::Result<Vec<Event>>;
    /// Inserts when `event.id` is unset and returns the stored event.
    async fn save_event(&self, event: Event) -> anyhow::Result<Event>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_reservation(&self, id: ReservationId) -> anyhow::Result<Option<Reservation>>;
    async fn list_reservations(&self, event_id: EventId) -> anyhow::Result<Vec<Reservation>>;
    /// Inserts when `reservation.id` is unset and returns the stored reservation.
    async fn save_reservation(&self, reservation: Reservation) -> anyhow::Result<Reservation>;
    async fn delete_reservation(&self, id: ReservationId) -> anyhow::Result<()>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_event_type(&self, id: EventTypeId) -> anyhow::Result<Option<EventType>>;
    async fn find_location_by_name(&self, name: &str) -> anyhow::Result<Option<Location>>;
    async fn find_speaker(&self, casy_ref: PersonRef) -> anyhow::Result<Option<Speaker>>;
}
