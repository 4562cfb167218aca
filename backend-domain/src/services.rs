// Domain services
pub mod availability;
pub mod capacity;
pub mod change_detector;
pub mod notice;

pub use availability::*;
pub use capacity::*;
pub use change_detector::*;
pub use notice::*;
