//! Plain data shared by the API client, the tracking engine, and the views.
mod fleet;
mod gps;

#[cfg(test)]
mod tests;

pub use fleet::{
    RideDetails, RideSummary, RouteFilter, RoutePoint, Vehicle, VehicleCategory, VehicleRoster,
};
pub use gps::{Bounds, GpsSample, Position, SampleStatus};
