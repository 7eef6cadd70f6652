pub mod in_flight;

pub use in_flight::{track_in_flight, InFlightGuard, InFlightTracker};
