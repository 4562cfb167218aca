pub mod event_commands;
pub mod reservation_commands;
