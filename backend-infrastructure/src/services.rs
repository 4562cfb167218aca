pub mod directory_service;
pub mod notification_service;

pub use directory_service::*;
pub use notification_service::*;
