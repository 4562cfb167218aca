use std::io::Read;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use backend_application::commands::event_commands::save_event;
use backend_application::commands::reservation_commands::{
    create_reservation, delete_reservation, update_reservation,
};
use backend_application::queries::availability_queries::event_availability;
use backend_application::queries::event_queries::{get_event, list_events, EventListQuery};
use backend_application::queries::event_type_queries::event_type_options;
use backend_application::AppState;
use backend_domain::{Event, EventId, EventTypeId, Reservation, ReservationId};

#[derive(Parser, Debug)]
#[command(name = "events-backend")]
#[command(about = "Event seat accounting and registrant notifications", long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Print the counters of this run to stderr when done
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create or update an event from a JSON document ("-" reads stdin)
    EventSave { file: String },
    /// List events, upcoming and active ones unless widened
    EventList {
        #[arg(long)]
        past: bool,
        #[arg(long)]
        inactive: bool,
    },
    EventShow { id: i64 },
    /// Register someone for an event from a JSON document ("-" reads stdin)
    ReservationCreate { file: String },
    ReservationUpdate { file: String },
    ReservationDelete { id: i64 },
    /// Seat availability of an event
    Availability { event_id: i64 },
    /// Options of an event type
    EventType { id: i64 },
}

pub async fn execute(state: &AppState, command: Command) -> Result<Value> {
    let output = match command {
        Command::EventSave { file } => {
            let event: Event = read_document(&file)?;
            let outcome = save_event(state, event).await?;
            info!(
                "event {:?} saved, {} notified, {} skipped",
                outcome.event.id, outcome.notifications.sent, outcome.notifications.skipped
            );
            serde_json::to_value(outcome)?
        }
        Command::EventList { past, inactive } => {
            let query = EventListQuery {
                include_past: past,
                include_inactive: inactive,
            };
            serde_json::to_value(list_events(state, query, Utc::now()).await?)?
        }
        Command::EventShow { id } => serde_json::to_value(get_event(state, EventId(id)).await?)?,
        Command::ReservationCreate { file } => {
            let reservation: Reservation = read_document(&file)?;
            serde_json::to_value(create_reservation(state, reservation).await?)?
        }
        Command::ReservationUpdate { file } => {
            let reservation: Reservation = read_document(&file)?;
            serde_json::to_value(update_reservation(state, reservation).await?)?
        }
        Command::ReservationDelete { id } => {
            serde_json::to_value(delete_reservation(state, ReservationId(id)).await?)?
        }
        Command::Availability { event_id } => {
            serde_json::to_value(event_availability(state, EventId(event_id)).await?)?
        }
        Command::EventType { id } => {
            serde_json::to_value(event_type_options(state, EventTypeId(id)).await?)?
        }
    };
    Ok(output)
}

fn read_document<T: DeserializeOwned>(file: &str) -> Result<T> {
    let content = if file == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(file).with_context(|| format!("cannot read {}", file))?
    };
    serde_json::from_str(&content).with_context(|| format!("invalid JSON document in {}", file))
}
