use std::time::Duration;

use url::Url;

use crate::config::parse_duration_value;
use crate::domain::{RouteFilter, VehicleCategory};
use crate::error::{AppError, AppResult, ValidationError};

pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::validation)
}

pub(crate) fn parse_base_url(s: &str) -> AppResult<Url> {
    let url = Url::parse(s.trim()).map_err(|err| {
        AppError::validation(ValidationError::InvalidBaseUrl {
            url: s.to_owned(),
            source: err,
        })
    })?;
    if url.cannot_be_a_base() {
        return Err(AppError::validation(ValidationError::BaseUrlCannotBeABase {
            url: s.to_owned(),
        }));
    }
    Ok(url)
}

pub(super) fn parse_ride_number(s: &str) -> AppResult<u32> {
    s.trim().parse::<u32>().map_err(|err| {
        AppError::validation(ValidationError::InvalidRideNumber {
            value: s.to_owned(),
            source: err,
        })
    })
}

pub(super) fn parse_category(s: &str) -> AppResult<VehicleCategory> {
    s.parse::<VehicleCategory>().map_err(AppError::from)
}

pub(super) fn parse_route_filter(s: &str) -> AppResult<RouteFilter> {
    s.parse::<RouteFilter>().map_err(AppError::from)
}
