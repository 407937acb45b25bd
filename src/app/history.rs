use crate::api::FleetApi;
use crate::args::{HistoryCommand, RouteArgs};
use crate::domain::{RouteFilter, RoutePoint};
use crate::error::{AppError, AppResult, DataError, ValidationError};
use crate::render::{END_LABEL, HistoryOverlay, START_LABEL, break_point_label};
use crate::tracking::normalize_route;
use crate::ui::Notice;

use super::report::Report;

const NOT_AVAILABLE: &str = "N/A";

pub(super) async fn collect(api: &dyn FleetApi, command: &HistoryCommand) -> AppResult<Report> {
    match command {
        HistoryCommand::Vehicles => vehicles(api).await,
        HistoryCommand::Rides { vehicle_id } => rides(api, vehicle_id).await,
        HistoryCommand::Ride { ride_no } => ride(api, *ride_no).await,
        HistoryCommand::Route(route_args) => route(api, route_args).await,
    }
}

async fn vehicles(api: &dyn FleetApi) -> AppResult<Report> {
    let ids = api.history_vehicles().await?;
    let mut report = Report::new("Vehicles with ride history");
    if ids.is_empty() {
        report.notice = Some(Notice::info("No vehicles with ride history."));
    }
    for id in ids {
        report.line(id);
    }
    Ok(report)
}

async fn rides(api: &dyn FleetApi, vehicle_id: &str) -> AppResult<Report> {
    let vehicle_id = vehicle_id.trim();
    if vehicle_id.is_empty() {
        return Err(AppError::validation(ValidationError::MissingVehicleOrRide));
    }
    let rides = api.vehicle_history(vehicle_id).await?;
    let mut report = Report::new(format!("Rides of {vehicle_id}"));
    if rides.is_empty() {
        report.notice = Some(Notice::info(
            DataError::NoRides {
                vehicle_id: vehicle_id.to_owned(),
            }
            .to_string(),
        ));
        return Ok(report);
    }
    for ride in rides {
        report.line(format!(
            "Ride {}: {} -> {}",
            ride.ride_no,
            ride.start_time.as_deref().unwrap_or(NOT_AVAILABLE),
            ride.end_time.as_deref().unwrap_or(NOT_AVAILABLE)
        ));
    }
    Ok(report)
}

async fn ride(api: &dyn FleetApi, ride_no: u32) -> AppResult<Report> {
    let details = api
        .ride_details(ride_no)
        .await?
        .ok_or_else(|| AppError::data(DataError::RideNotFound { ride_no }))?;

    let mut report = Report::new(format!("Ride {ride_no}"));
    if let Some(vehicle_id) = details.vehicle_id.as_deref() {
        report.line(format!("Vehicle: {vehicle_id}"));
    }
    report.line(format!("Start Time: {}", details.start_time));
    report.line(format!("End Time: {}", details.end_time));
    if let Some(duration) = details.duration() {
        report.line(format!(
            "Duration: {}h {:02}m {:02}s",
            duration.num_hours(),
            duration.num_minutes().rem_euclid(60),
            duration.num_seconds().rem_euclid(60)
        ));
    }
    Ok(report)
}

async fn route(api: &dyn FleetApi, args: &RouteArgs) -> AppResult<Report> {
    let vehicle_id = args
        .vehicle_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    let (Some(ride_no), Some(vehicle_id)) = (args.ride_no, vehicle_id) else {
        return Err(AppError::validation(ValidationError::MissingVehicleOrRide));
    };

    let filter = args.filter;
    let raw = api
        .ride_route(ride_no, vehicle_id, filter)
        .await?
        .ok_or_else(|| {
            AppError::data(DataError::NoRoute {
                ride_no,
                filter: filter.as_query(),
            })
        })?;
    let points = normalize_route(&raw)?;
    tracing::debug!(
        ride_no,
        vehicle_id,
        filter = filter.as_query(),
        points = points.len(),
        "Loaded ride route"
    );

    let mut report = Report::new(format!(
        "Ride {ride_no} of {vehicle_id} ({})",
        filter.as_query()
    ));
    let mut overlay = HistoryOverlay::default();
    match filter {
        RouteFilter::Ride => {
            overlay.draw_route(&mut report.map, ride_no, &points)?;
            report.line(format!("Points: {}", points.len()));
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                report.line(located(START_LABEL, first));
                report.line(located(END_LABEL, last));
            }
        }
        RouteFilter::BreakPoints => {
            let drawn = overlay.draw_break_points(&mut report.map, ride_no, &points)?;
            report.line(format!("Break points: {drawn}"));
            for point in points.iter().filter(|point| point.sample.status.is_break()) {
                report.line(located(&break_point_label(point), point));
            }
        }
    }
    Ok(report)
}

fn located(label: &str, point: &RoutePoint) -> String {
    format!(
        "{label}: {}, {}",
        point.sample.latitude, point.sample.longitude
    )
}
