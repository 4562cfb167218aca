// Domain entities
pub mod config;
pub mod event;
pub mod event_type;
pub mod location;
pub mod notification;
pub mod person;
pub mod reservation;

pub use config::*;
pub use event::*;
pub use event_type::*;
pub use location::*;
pub use notification::*;
pub use person::*;
pub use reservation::*;
