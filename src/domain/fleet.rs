use chrono::{DateTime, FixedOffset};

use crate::error::ValidationError;

use super::gps::{GpsSample, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleCategory {
    Moving,
    Free,
    Idle,
}

impl VehicleCategory {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            VehicleCategory::Moving => "Moving",
            VehicleCategory::Free => "Free",
            VehicleCategory::Idle => "Idle",
        }
    }
}

impl std::str::FromStr for VehicleCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moving" => Ok(VehicleCategory::Moving),
            "free" => Ok(VehicleCategory::Free),
            "idle" => Ok(VehicleCategory::Idle),
            _ => Err(ValidationError::InvalidCategory {
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub vehicle_id: String,
    /// Current position for free/idle vehicles; moving vehicles only carry a
    /// trip origin, which is reported here when present.
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleRoster {
    pub moving: Vec<Vehicle>,
    pub free: Vec<Vehicle>,
    pub idle: Vec<Vehicle>,
}

impl VehicleRoster {
    #[must_use]
    pub fn category(&self, category: VehicleCategory) -> &[Vehicle] {
        match category {
            VehicleCategory::Moving => self.moving.as_slice(),
            VehicleCategory::Free => self.free.as_slice(),
            VehicleCategory::Idle => self.idle.as_slice(),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.moving
            .len()
            .saturating_add(self.free.len())
            .saturating_add(self.idle.len())
    }

    /// Vehicles selectable for live tracking.
    #[must_use]
    pub fn trackable_ids(&self) -> Vec<&str> {
        self.moving
            .iter()
            .map(|vehicle| vehicle.vehicle_id.as_str())
            .collect()
    }

    /// Every vehicle id, moving first, then free, then idle.
    #[must_use]
    pub fn all_ids(&self) -> Vec<&str> {
        self.moving
            .iter()
            .chain(self.free.iter())
            .chain(self.idle.iter())
            .map(|vehicle| vehicle.vehicle_id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideSummary {
    pub ride_no: u32,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideDetails {
    pub ride_no: u32,
    pub vehicle_id: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

impl RideDetails {
    /// Ride length when both timestamps are RFC 3339.
    #[must_use]
    pub fn duration(&self) -> Option<chrono::Duration> {
        let start = parse_timestamp(&self.start_time)?;
        let end = parse_timestamp(&self.end_time)?;
        Some(end.signed_duration_since(start))
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub sample: GpsSample,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RouteFilter {
    #[default]
    Ride,
    BreakPoints,
}

impl RouteFilter {
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            RouteFilter::Ride => "ride",
            RouteFilter::BreakPoints => "break-points",
        }
    }
}

impl std::str::FromStr for RouteFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ride" => Ok(RouteFilter::Ride),
            "break-points" | "breakpoints" | "breaks" => Ok(RouteFilter::BreakPoints),
            _ => Err(ValidationError::InvalidRouteFilter {
                value: s.to_owned(),
            }),
        }
    }
}
