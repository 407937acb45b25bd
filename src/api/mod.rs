//! Read-only access to the fleet backend.
//!
//! [`FleetApi`] is the seam the tracking engine and the history/fleet views
//! depend on. [`FleetClient`] implements it over HTTP; tests substitute
//! in-memory implementations.
mod client;
mod wire;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;

use crate::domain::{RideDetails, RideSummary, RouteFilter, VehicleRoster};
use crate::error::AppResult;

pub use client::{DEFAULT_USER_AGENT, FleetClient};
pub use wire::{RawRoutePoint, RawSample};

#[async_trait]
pub trait FleetApi: Send + Sync {
    /// Fetches the GPS trace of a vehicle, in chronological order.
    ///
    /// Returns `Ok(None)` when the backend does not know the vehicle or sends
    /// no list at all.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails, the backend answers with an
    /// unexpected status, or the body cannot be decoded.
    async fn gps_trace(&self, vehicle_id: &str) -> AppResult<Option<Vec<RawSample>>>;

    /// Fetches the live vehicle roster.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    async fn vehicle_roster(&self) -> AppResult<VehicleRoster>;

    /// Fetches the static fleet snapshot used for status counts.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    async fn fleet_snapshot(&self) -> AppResult<VehicleRoster>;

    /// Fetches the ids of every vehicle that has recorded rides.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    async fn history_vehicles(&self) -> AppResult<Vec<String>>;

    /// Lists the recorded rides of a vehicle.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    async fn vehicle_history(&self, vehicle_id: &str) -> AppResult<Vec<RideSummary>>;

    /// Fetches a single ride summary, `Ok(None)` when the ride is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    async fn ride_details(&self, ride_no: u32) -> AppResult<Option<RideDetails>>;

    /// Fetches the stored route of a past ride, `Ok(None)` when the backend
    /// has no route for the ride/vehicle pair.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or decoding fails.
    async fn ride_route(
        &self,
        ride_no: u32,
        vehicle_id: &str,
        filter: RouteFilter,
    ) -> AppResult<Option<Vec<RawRoutePoint>>>;
}
