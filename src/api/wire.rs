use serde::Deserialize;

use crate::domain::{Position, RideDetails, RideSummary, Vehicle, VehicleRoster};

/// Placeholder the backend writes for missing ride times.
const MISSING_TIME: &str = "N/A";

/// A GPS sample exactly as the backend sent it; validated by the route loader.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSample {
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRoutePoint {
    #[serde(flatten)]
    pub sample: RawSample,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireRoster {
    #[serde(default)]
    moving_vehicles: Vec<WireVehicle>,
    #[serde(default)]
    free_vehicles: Vec<WireVehicle>,
    #[serde(default)]
    idle_vehicles: Vec<WireVehicle>,
}

impl WireRoster {
    pub(super) fn into_roster(self) -> VehicleRoster {
        VehicleRoster {
            moving: self.moving_vehicles.into_iter().map(Vehicle::from).collect(),
            free: self.free_vehicles.into_iter().map(Vehicle::from).collect(),
            idle: self.idle_vehicles.into_iter().map(Vehicle::from).collect(),
        }
    }

    pub(super) fn into_ids(self) -> Vec<String> {
        self.into_roster()
            .all_ids()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

/// Roster entries are full records on the live endpoints and bare ids on the
/// history roster.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireVehicle {
    Id(String),
    Record(WireVehicleRecord),
}

#[derive(Debug, Deserialize)]
struct WireVehicleRecord {
    vehicle_id: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    start_lat: Option<f64>,
    #[serde(default)]
    start_lng: Option<f64>,
}

impl From<WireVehicle> for Vehicle {
    fn from(value: WireVehicle) -> Self {
        match value {
            WireVehicle::Id(vehicle_id) => Vehicle {
                vehicle_id,
                position: None,
            },
            WireVehicle::Record(record) => {
                let current = record.lat.zip(record.lng);
                let origin = record.start_lat.zip(record.start_lng);
                Vehicle {
                    vehicle_id: record.vehicle_id,
                    position: current
                        .or(origin)
                        .map(|(latitude, longitude)| Position::new(latitude, longitude))
                        .filter(|position| position.is_finite()),
                }
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireHistory {
    #[serde(default)]
    rides: Vec<WireRide>,
}

#[derive(Debug, Deserialize)]
struct WireRide {
    ride_no: u32,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
}

impl WireHistory {
    pub(super) fn into_rides(self) -> Vec<RideSummary> {
        self.rides
            .into_iter()
            .map(|ride| RideSummary {
                ride_no: ride.ride_no,
                start_time: known_time(ride.start_time),
                end_time: known_time(ride.end_time),
            })
            .collect()
    }
}

fn known_time(value: Option<String>) -> Option<String> {
    value.filter(|time| !time.trim().is_empty() && time.trim() != MISSING_TIME)
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireRideDetails {
    #[serde(default)]
    ride: Option<WireRideRecord>,
}

#[derive(Debug, Deserialize)]
struct WireRideRecord {
    #[serde(default)]
    ride_no: Option<u32>,
    #[serde(default)]
    vehicle_id: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
}

impl WireRideDetails {
    pub(super) fn into_details(self, requested: u32) -> Option<RideDetails> {
        self.ride.map(|ride| RideDetails {
            ride_no: ride.ride_no.unwrap_or(requested),
            vehicle_id: ride.vehicle_id,
            start_time: ride.start_time.unwrap_or_else(|| MISSING_TIME.to_owned()),
            end_time: ride.end_time.unwrap_or_else(|| MISSING_TIME.to_owned()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireRoute {
    #[serde(default)]
    pub(super) route: Option<Vec<RawRoutePoint>>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireErrorBody {
    #[serde(default)]
    pub(super) error: Option<String>,
}
