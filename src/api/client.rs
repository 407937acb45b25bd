use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{RideDetails, RideSummary, RouteFilter, VehicleRoster};
use crate::error::{AppError, AppResult, HttpError, ValidationError};

use super::FleetApi;
use super::wire::{
    RawRoutePoint, RawSample, WireErrorBody, WireHistory, WireRideDetails, WireRoster, WireRoute,
};

pub const DEFAULT_USER_AGENT: &str = concat!("fleetview/", env!("CARGO_PKG_VERSION"));

const API_PREFIX: &str = "api";
const GPS_DATA_PATH: &str = "get_vehicle_gps_data";
const ALL_VEHICLES_PATH: &str = "get_all_vehicles";
const HISTORY_VEHICLES_PATH: &str = "get_allhistory_vehicles";
const VEHICLE_HISTORY_PATH: &str = "get_vehicle_history";
const RIDE_DETAILS_PATH: &str = "get_ride_details";
const RIDE_ROUTE_PATH: &str = "get_ride_detailshistory";
const SNAPSHOT_PATH: [&str; 3] = ["static", "data", "vehicles.json"];

/// HTTP implementation of [`FleetApi`]. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct FleetClient {
    client: Client,
    base_url: Url,
}

impl FleetClient {
    /// Builds a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry paths or the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &Url, request_timeout: Duration) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::validation(ValidationError::BaseUrlCannotBeABase {
                url: base_url.to_string(),
            }));
        }
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self {
            client,
            base_url: base_url.clone(),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::validation(ValidationError::BaseUrlCannotBeABase {
                    url: self.base_url.to_string(),
                })
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn api_endpoint(&self, path: &str, id: Option<&str>) -> AppResult<Url> {
        match id {
            Some(id) => self.endpoint(&[API_PREFIX, path, id]),
            None => self.endpoint(&[API_PREFIX, path]),
        }
    }

    /// GETs `url` and decodes the JSON body. A 404 is reported as `Ok(None)`
    /// since the backend uses it for unknown vehicles and rides.
    async fn get_json<T>(&self, url: Url) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url_text = url.to_string();
        tracing::debug!(url = %url_text, "GET");
        let response = self.client.get(url).send().await.map_err(|err| {
            AppError::http(HttpError::RequestFailed {
                url: url_text.clone(),
                source: err,
            })
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            AppError::http(HttpError::ReadBodyFailed {
                url: url_text.clone(),
                source: err,
            })
        })?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(url = %url_text, detail = ?error_detail(&body), "Not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::http(HttpError::UnexpectedStatus {
                url: url_text,
                status: status.as_u16(),
                detail: error_detail(&body),
            }));
        }

        serde_json::from_slice::<Option<T>>(&body).map_err(|err| {
            AppError::http(HttpError::DecodeFailed {
                url: url_text,
                source: err,
            })
        })
    }
}

fn error_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<WireErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
}

#[async_trait]
impl FleetApi for FleetClient {
    async fn gps_trace(&self, vehicle_id: &str) -> AppResult<Option<Vec<RawSample>>> {
        let url = self.api_endpoint(GPS_DATA_PATH, Some(vehicle_id))?;
        self.get_json(url).await
    }

    async fn vehicle_roster(&self) -> AppResult<VehicleRoster> {
        let url = self.api_endpoint(ALL_VEHICLES_PATH, None)?;
        let roster: Option<WireRoster> = self.get_json(url).await?;
        Ok(roster.unwrap_or_default().into_roster())
    }

    async fn fleet_snapshot(&self) -> AppResult<VehicleRoster> {
        let url = self.endpoint(&SNAPSHOT_PATH)?;
        let roster: Option<WireRoster> = self.get_json(url).await?;
        Ok(roster.unwrap_or_default().into_roster())
    }

    async fn history_vehicles(&self) -> AppResult<Vec<String>> {
        let url = self.api_endpoint(HISTORY_VEHICLES_PATH, None)?;
        let roster: Option<WireRoster> = self.get_json(url).await?;
        Ok(roster.unwrap_or_default().into_ids())
    }

    async fn vehicle_history(&self, vehicle_id: &str) -> AppResult<Vec<RideSummary>> {
        let url = self.api_endpoint(VEHICLE_HISTORY_PATH, Some(vehicle_id))?;
        let history: Option<WireHistory> = self.get_json(url).await?;
        Ok(history.unwrap_or_default().into_rides())
    }

    async fn ride_details(&self, ride_no: u32) -> AppResult<Option<RideDetails>> {
        let ride = ride_no.to_string();
        let url = self.api_endpoint(RIDE_DETAILS_PATH, Some(&ride))?;
        let details: Option<WireRideDetails> = self.get_json(url).await?;
        Ok(details.and_then(|details| details.into_details(ride_no)))
    }

    async fn ride_route(
        &self,
        ride_no: u32,
        vehicle_id: &str,
        filter: RouteFilter,
    ) -> AppResult<Option<Vec<RawRoutePoint>>> {
        let ride = ride_no.to_string();
        let mut url = self.api_endpoint(RIDE_ROUTE_PATH, Some(&ride))?;
        url.query_pairs_mut()
            .append_pair("vehicle_id", vehicle_id)
            .append_pair("filter", filter.as_query());
        let route: Option<WireRoute> = self.get_json(url).await?;
        Ok(route.and_then(|route| route.route))
    }
}
