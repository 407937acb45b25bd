use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{RideDetails, RideSummary, RouteFilter, VehicleRoster};
use crate::error::{AppError, AppResult, HttpError};

use super::{FleetApi, RawRoutePoint, RawSample};

/// In-memory backend with canned answers and a GPS load counter.
#[derive(Debug, Default)]
pub(crate) struct StubApi {
    pub(crate) traces: HashMap<String, Vec<RawSample>>,
    pub(crate) roster: VehicleRoster,
    pub(crate) rides: HashMap<String, Vec<RideSummary>>,
    pub(crate) details: HashMap<u32, RideDetails>,
    pub(crate) routes: HashMap<(u32, RouteFilter), Vec<RawRoutePoint>>,
    /// Every call fails with a 500 when set.
    pub(crate) failing: bool,
    loads: AtomicUsize,
}

impl StubApi {
    pub(crate) fn with_trace(vehicle_id: &str, samples: Vec<RawSample>) -> Self {
        let mut api = Self::default();
        api.traces.insert(vehicle_id.to_owned(), samples);
        api
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn check(&self, path: &str) -> AppResult<()> {
        if self.failing {
            return Err(AppError::http(HttpError::UnexpectedStatus {
                url: format!("stub://{path}"),
                status: 500,
                detail: None,
            }));
        }
        Ok(())
    }
}

pub(crate) fn sample(latitude: f64, longitude: f64, status: Option<&str>) -> RawSample {
    RawSample {
        latitude: Some(latitude),
        longitude: Some(longitude),
        status: status.map(str::to_owned),
    }
}

#[async_trait]
impl FleetApi for StubApi {
    async fn gps_trace(&self, vehicle_id: &str) -> AppResult<Option<Vec<RawSample>>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.check("gps")?;
        Ok(self.traces.get(vehicle_id).cloned())
    }

    async fn vehicle_roster(&self) -> AppResult<VehicleRoster> {
        self.check("roster")?;
        Ok(self.roster.clone())
    }

    async fn fleet_snapshot(&self) -> AppResult<VehicleRoster> {
        self.check("snapshot")?;
        Ok(self.roster.clone())
    }

    async fn history_vehicles(&self) -> AppResult<Vec<String>> {
        self.check("history")?;
        Ok(self
            .roster
            .all_ids()
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    async fn vehicle_history(&self, vehicle_id: &str) -> AppResult<Vec<RideSummary>> {
        self.check("rides")?;
        Ok(self.rides.get(vehicle_id).cloned().unwrap_or_default())
    }

    async fn ride_details(&self, ride_no: u32) -> AppResult<Option<RideDetails>> {
        self.check("details")?;
        Ok(self.details.get(&ride_no).cloned())
    }

    async fn ride_route(
        &self,
        ride_no: u32,
        _vehicle_id: &str,
        filter: RouteFilter,
    ) -> AppResult<Option<Vec<RawRoutePoint>>> {
        self.check("route")?;
        Ok(self.routes.get(&(ride_no, filter)).cloned())
    }
}
