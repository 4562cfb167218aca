use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

use backend_domain::{
    CatalogRepository, Event, EventId, EventRepository, EventType, EventTypeId, Location,
    PersonRef, Reservation, ReservationId, ReservationRepository, Speaker,
};

use crate::utils::ensure_parent_dir;

/// Everything the store keeps, as written to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreDocument {
    pub event_types: Vec<EventType>,
    pub locations: Vec<Location>,
    pub speakers: Vec<Speaker>,
    pub events: Vec<Event>,
    pub reservations: Vec<Reservation>,
    /// Last id handed out, so ids of deleted rows are never reused.
    pub last_event_id: i64,
    pub last_reservation_id: i64,
}

impl StoreDocument {
    fn next_event_id(&mut self) -> EventId {
        let highest = self
            .events
            .iter()
            .filter_map(|event| event.id.map(|id| id.0))
            .max()
            .unwrap_or_default();
        self.last_event_id = self.last_event_id.max(highest) + 1;
        EventId(self.last_event_id)
    }

    fn next_reservation_id(&mut self) -> ReservationId {
        let highest = self
            .reservations
            .iter()
            .filter_map(|reservation| reservation.id.map(|id| id.0))
            .max()
            .unwrap_or_default();
        self.last_reservation_id = self.last_reservation_id.max(highest) + 1;
        ReservationId(self.last_reservation_id)
    }
}

/// Repository over a single JSON document. The document is held in memory and
/// flushed after every write; without a path nothing is written.
pub struct JsonFileStore {
    path: Option<PathBuf>,
    document: RwLock<StoreDocument>,
}

impl JsonFileStore {
    pub fn in_memory(document: StoreDocument) -> Self {
        Self {
            path: None,
            document: RwLock::new(document),
        }
    }

    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            serde_json::from_str(&content)?
        } else {
            warn!("{} not found, starting with an empty store", path.display());
            StoreDocument::default()
        };
        Ok(Self {
            path: Some(path),
            document: RwLock::new(document),
        })
    }

    /// Applies `change` to a copy of the document; the copy replaces the
    /// held document only after it is on disk.
    async fn commit<T>(&self, change: impl FnOnce(&mut StoreDocument) -> T) -> Result<T> {
        let mut document = self.document.write().await;
        let mut next = document.clone();
        let output = change(&mut next);
        if let Some(path) = &self.path {
            write_document(path, &next).await?;
        }
        *document = next;
        Ok(output)
    }
}

async fn write_document(path: &Path, document: &StoreDocument) -> Result<()> {
    ensure_parent_dir(path).await?;
    let content = serde_json::to_string_pretty(document)?;
    fs::write(path, content).await?;
    Ok(())
}

#[async_trait]
impl EventRepository for JsonFileStore {
    async fn find_event(&self, id: EventId) -> anyhow::Result<Option<Event>> {
        Ok(self
            .document
            .read()
            .await
            .events
            .iter()
            .find(|event| event.id == Some(id))
            .cloned())
    }

    async fn list_events(&self) -> anyhow::Result<Vec<Event>> {
        Ok(self.document.read().await.events.clone())
    }

    async fn save_event(&self, mut event: Event) -> anyhow::Result<Event> {
        self.commit(|document| {
            match event.id {
                Some(id) => match document.events.iter().position(|stored| stored.id == Some(id)) {
                    Some(index) => document.events[index] = event.clone(),
                    None => document.events.push(event.clone()),
                },
                None => {
                    event.id = Some(document.next_event_id());
                    document.events.push(event.clone());
                }
            }
            event
        })
        .await
    }
}

#[async_trait]
impl ReservationRepository for JsonFileStore {
    async fn find_reservation(&self, id: ReservationId) -> anyhow::Result<Option<Reservation>> {
        Ok(self
            .document
            .read()
            .await
            .reservations
            .iter()
            .find(|reservation| reservation.id == Some(id))
            .cloned())
    }

    async fn list_reservations(&self, event_id: EventId) -> anyhow::Result<Vec<Reservation>> {
        Ok(self
            .document
            .read()
            .await
            .reservations
            .iter()
            .filter(|reservation| reservation.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn save_reservation(&self, mut reservation: Reservation) -> anyhow::Result<Reservation> {
        self.commit(|document| {
            match reservation.id {
                Some(id) => match document
                    .reservations
                    .iter()
                    .position(|stored| stored.id == Some(id))
                {
                    Some(index) => document.reservations[index] = reservation.clone(),
                    None => document.reservations.push(reservation.clone()),
                },
                None => {
                    reservation.id = Some(document.next_reservation_id());
                    document.reservations.push(reservation.clone());
                }
            }
            reservation
        })
        .await
    }

    async fn delete_reservation(&self, id: ReservationId) -> anyhow::Result<()> {
        let exists = self
            .document
            .read()
            .await
            .reservations
            .iter()
            .any(|reservation| reservation.id == Some(id));
        if !exists {
            return Ok(());
        }
        self.commit(|document| {
            document
                .reservations
                .retain(|reservation| reservation.id != Some(id));
        })
        .await
    }
}

#[async_trait]
impl CatalogRepository for JsonFileStore {
    async fn find_event_type(&self, id: EventTypeId) -> anyhow::Result<Option<EventType>> {
        Ok(self
            .document
            .read()
            .await
            .event_types
            .iter()
            .find(|event_type| event_type.id == id)
            .cloned())
    }

    async fn find_location_by_name(&self, name: &str) -> anyhow::Result<Option<Location>> {
        Ok(self
            .document
            .read()
            .await
            .locations
            .iter()
            .find(|location| location.name == name)
            .cloned())
    }

    async fn find_speaker(&self, casy_ref: PersonRef) -> anyhow::Result<Option<Speaker>> {
        Ok(self
            .document
            .read()
            .await
            .speakers
            .iter()
            .find(|speaker| speaker.casy_ref == casy_ref)
            .cloned())
    }
}
