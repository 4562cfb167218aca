// Domain value objects
pub mod identifiers;
pub mod reservation_kind;
pub mod seat_status;

pub use identifiers::*;
pub use reservation_kind::*;
pub use seat_status::*;
