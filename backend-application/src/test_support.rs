// In-memory fakes of the domain ports for application tests

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

use backend_domain::ports::{
    CatalogRepository, EventRepository, IdentityLookup, NotificationSender, ReservationRepository,
};
use backend_domain::{
    Event, EventId, EventLocation, EventType, EventTypeId, Location, LocationId,
    NotificationRequest, Person, PersonRef, Reservation, ReservationId, RuntimeConfig, Speaker,
};

use crate::{AppState, Metrics, NotificationDispatcher};

pub fn person(id: i64, email: Option<&str>) -> Person {
    Person {
        casy_ref: PersonRef(id),
        salutation: "Dr.".to_string(),
        first_name: format!("First{}", id),
        last_name: format!("Last{}", id),
        email: email.map(ToString::to_string),
    }
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 9, 0, 0).unwrap()
}

pub fn seminar_type() -> EventType {
    EventType {
        id: EventTypeId(1),
        name: "seminar".to_string(),
        title: "Seminar".to_string(),
        is_active: true,
        allow_internal_registrations: true,
        allow_external_registrations: true,
        has_speakers: true,
        has_topic: true,
    }
}

pub fn new_event() -> Event {
    Event {
        id: None,
        title: "Lipid signalling".to_string(),
        is_active: true,
        event_type: EventTypeId(1),
        speakers: Vec::new(),
        topic: Some("Membranes".to_string()),
        start_date: day(1),
        end_date: day(2),
        person_in_charge: None,
        location: EventLocation::Inhouse {
            room: Some("Room 245".to_string()),
        },
        short_description: None,
        full_description: String::new(),
        notes: None,
        casy_ref: 1000,
        seats_available: Some(10),
        seats_for_internals_only: Some(4),
    }
}

#[derive(Default)]
pub struct Directory {
    people: HashMap<PersonRef, Person>,
    failing: HashSet<PersonRef>,
}

impl Directory {
    pub fn with(mut self, person: Person) -> Self {
        self.people.insert(person.casy_ref, person);
        self
    }

    pub fn failing_for(mut self, id: i64) -> Self {
        self.failing.insert(PersonRef(id));
        self
    }
}

#[async_trait]
impl IdentityLookup for Directory {
    async fn resolve(&self, person: PersonRef) -> anyhow::Result<Option<Person>> {
        if self.failing.contains(&person) {
            anyhow::bail!("directory unavailable");
        }
        Ok(self.people.get(&person).cloned())
    }
}

#[derive(Default)]
pub struct RecordingSender {
    requests: Mutex<Vec<NotificationRequest>>,
}

impl RecordingSender {
    pub fn requests(&self) -> Vec<NotificationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.context.message)
            .collect()
    }
}

impl NotificationSender for RecordingSender {
    fn send(&self, request: NotificationRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[derive(Default)]
struct MemoryData {
    events: HashMap<EventId, Event>,
    reservations: HashMap<ReservationId, Reservation>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
    event_types: Vec<EventType>,
    locations: Vec<Location>,
    speakers: Vec<Speaker>,
}

impl MemoryStore {
    pub fn with_catalog(event_types: Vec<EventType>) -> Self {
        Self {
            event_types,
            locations: vec![
                Location {
                    id: LocationId(1),
                    name: "Room 245".to_string(),
                },
                Location {
                    id: LocationId(2),
                    name: "Room 101".to_string(),
                },
            ],
            speakers: vec![Speaker {
                casy_ref: PersonRef(500),
                bio: "Membrane biologist".to_string(),
            }],
            ..Self::default()
        }
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn find_event(&self, id: EventId) -> anyhow::Result<Option<Event>> {
        Ok(self.data.read().await.events.get(&id).cloned())
    }

    async fn list_events(&self) -> anyhow::Result<Vec<Event>> {
        let mut events = self
            .data
            .read()
            .await
            .events
            .values()
            .cloned()
            .collect::<Vec<_>>();
        events.sort_by_key(|event| event.id);
        Ok(events)
    }

    async fn save_event(&self, mut event: Event) -> anyhow::Result<Event> {
        let mut data = self.data.write().await;
        let id = match event.id {
            Some(id) => id,
            None => {
                data.next_id += 1;
                EventId(data.next_id)
            }
        };
        event.id = Some(id);
        data.events.insert(id, event.clone());
        Ok(event)
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn find_reservation(&self, id: ReservationId) -> anyhow::Result<Option<Reservation>> {
        Ok(self.data.read().await.reservations.get(&id).cloned())
    }

    async fn list_reservations(&self, event_id: EventId) -> anyhow::Result<Vec<Reservation>> {
        let mut reservations = self
            .data
            .read()
            .await
            .reservations
            .values()
            .filter(|reservation| reservation.event_id == event_id)
            .cloned()
            .collect::<Vec<_>>();
        reservations.sort_by_key(|reservation| reservation.id);
        Ok(reservations)
    }

    async fn save_reservation(&self, mut reservation: Reservation) -> anyhow::Result<Reservation> {
        let mut data = self.data.write().await;
        let id = match reservation.id {
            Some(id) => id,
            None => {
                data.next_id += 1;
                ReservationId(data.next_id)
            }
        };
        reservation.id = Some(id);
        data.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn delete_reservation(&self, id: ReservationId) -> anyhow::Result<()> {
        self.data.write().await.reservations.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn find_event_type(&self, id: EventTypeId) -> anyhow::Result<Option<EventType>> {
        Ok(self.event_types.iter().find(|item| item.id == id).cloned())
    }

    async fn find_location_by_name(&self, name: &str) -> anyhow::Result<Option<Location>> {
        Ok(self.locations.iter().find(|item| item.name == name).cloned())
    }

    async fn find_speaker(&self, casy_ref: PersonRef) -> anyhow::Result<Option<Speaker>> {
        Ok(self
            .speakers
            .iter()
            .find(|item| item.casy_ref == casy_ref)
            .cloned())
    }
}

/// Reads through to the wrapped repository; every event write fails.
pub struct RejectingEventWrites(pub Arc<dyn EventRepository>);

#[async_trait]
impl EventRepository for RejectingEventWrites {
    async fn find_event(&self, id: EventId) -> anyhow::Result<Option<Event>> {
        self.0.find_event(id).await
    }

    async fn list_events(&self) -> anyhow::Result<Vec<Event>> {
        self.0.list_events().await
    }

    async fn save_event(&self, _event: Event) -> anyhow::Result<Event> {
        anyhow::bail!("disk full")
    }
}

pub struct Harness {
    pub state: AppState,
    pub sender: Arc<RecordingSender>,
}

pub fn harness(directory: Directory, event_types: Vec<EventType>) -> Harness {
    let store = Arc::new(MemoryStore::with_catalog(event_types));
    let sender = Arc::new(RecordingSender::default());
    let metrics = Arc::new(Metrics::default());
    let dispatcher = NotificationDispatcher::new(
        Arc::new(directory),
        sender.clone(),
        "event_notification",
        metrics.clone(),
    );
    let state = AppState {
        config: RuntimeConfig::default(),
        event_repo: store.clone(),
        reservation_repo: store.clone(),
        catalog_repo: store,
        dispatcher: Arc::new(dispatcher),
        metrics,
    };
    Harness { state, sender }
}
