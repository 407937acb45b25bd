use crate::api::{FleetApi, RawRoutePoint, RawSample};
use crate::domain::{GpsSample, RoutePoint, SampleStatus};
use crate::error::{AppError, AppResult, DataError};

/// Fetches the GPS trace of `vehicle_id` and validates it for playback.
///
/// # Errors
///
/// Returns [`DataError::NoGpsData`] when the backend has no samples for the
/// vehicle, [`DataError::InvalidCoordinate`] when a sample carries a missing or
/// non-finite coordinate, and fetch errors from the API unchanged.
pub async fn load_route(api: &dyn FleetApi, vehicle_id: &str) -> AppResult<Vec<GpsSample>> {
    let samples = api.gps_trace(vehicle_id).await?.unwrap_or_default();
    if samples.is_empty() {
        return Err(AppError::data(DataError::NoGpsData {
            vehicle_id: vehicle_id.to_owned(),
        }));
    }
    let points = normalize_samples(&samples)?;
    tracing::debug!(vehicle_id, points = points.len(), "GPS trace loaded");
    Ok(points)
}

/// Validates raw samples, keeping their order.
///
/// # Errors
///
/// Returns [`DataError::InvalidCoordinate`] for the first sample whose
/// latitude or longitude is missing or not finite.
pub fn normalize_samples(samples: &[RawSample]) -> Result<Vec<GpsSample>, DataError> {
    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| normalize_sample(index, sample))
        .collect()
}

/// Validates a stored ride route the same way as a live trace.
///
/// # Errors
///
/// Returns [`DataError::InvalidCoordinate`] for the first invalid point.
pub fn normalize_route(points: &[RawRoutePoint]) -> Result<Vec<RoutePoint>, DataError> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            Ok(RoutePoint {
                sample: normalize_sample(index, &point.sample)?,
                timestamp: point.timestamp.clone(),
            })
        })
        .collect()
}

fn normalize_sample(index: usize, sample: &RawSample) -> Result<GpsSample, DataError> {
    let latitude = finite(sample.latitude).ok_or(DataError::InvalidCoordinate {
        index,
        field: "latitude",
    })?;
    let longitude = finite(sample.longitude).ok_or(DataError::InvalidCoordinate {
        index,
        field: "longitude",
    })?;
    Ok(GpsSample::new(
        latitude,
        longitude,
        SampleStatus::from_wire(sample.status.as_deref()),
    ))
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|coordinate| coordinate.is_finite())
}
