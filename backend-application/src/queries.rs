pub mod availability_queries;
pub mod event_queries;
pub mod event_type_queries;
