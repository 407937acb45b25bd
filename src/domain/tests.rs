use super::*;
use crate::error::{AppError, AppResult};

fn vehicle(id: &str) -> Vehicle {
    Vehicle {
        vehicle_id: id.to_owned(),
        position: None,
    }
}

#[test]
fn status_maps_ride_and_missing_to_normal() -> AppResult<()> {
    if SampleStatus::from_wire(Some("ride")) != SampleStatus::Normal {
        return Err(AppError::validation("ride should map to normal"));
    }
    if SampleStatus::from_wire(None) != SampleStatus::Normal {
        return Err(AppError::validation("missing status should map to normal"));
    }
    if SampleStatus::from_wire(Some(" Break ")) != SampleStatus::Break {
        return Err(AppError::validation("break should be case-insensitive"));
    }
    Ok(())
}

#[test]
fn bounds_enclose_all_positions() -> AppResult<()> {
    let bounds = Bounds::enclosing([
        Position::new(26.50, 80.29),
        Position::new(26.49, 80.31),
        Position::new(26.51, 80.28),
    ])
    .ok_or_else(|| AppError::validation("Expected bounds"))?;
    if bounds.south_west != Position::new(26.49, 80.28) {
        return Err(AppError::validation(format!(
            "Unexpected south-west corner {:?}",
            bounds.south_west
        )));
    }
    if bounds.north_east != Position::new(26.51, 80.31) {
        return Err(AppError::validation(format!(
            "Unexpected north-east corner {:?}",
            bounds.north_east
        )));
    }
    if Bounds::enclosing(std::iter::empty()).is_some() {
        return Err(AppError::validation("Empty input should have no bounds"));
    }
    Ok(())
}

#[test]
fn roster_lists_ids_in_dropdown_order() -> AppResult<()> {
    let roster = VehicleRoster {
        moving: vec![vehicle("MV-1"), vehicle("MV-2")],
        free: vec![vehicle("FR-1")],
        idle: vec![vehicle("ID-1")],
    };
    if roster.total() != 4 {
        return Err(AppError::validation("Expected 4 vehicles"));
    }
    if roster.trackable_ids() != vec!["MV-1", "MV-2"] {
        return Err(AppError::validation("Only moving vehicles are trackable"));
    }
    if roster.all_ids() != vec!["MV-1", "MV-2", "FR-1", "ID-1"] {
        return Err(AppError::validation("Unexpected history dropdown order"));
    }
    Ok(())
}

#[test]
fn route_filter_parses_query_values() -> AppResult<()> {
    let ride: RouteFilter = "ride".parse()?;
    let breaks: RouteFilter = "break-points".parse()?;
    if ride.as_query() != "ride" || breaks.as_query() != "break-points" {
        return Err(AppError::validation("Unexpected filter query values"));
    }
    if "stops".parse::<RouteFilter>().is_ok() {
        return Err(AppError::validation("Unknown filter should be rejected"));
    }
    Ok(())
}

#[test]
fn ride_duration_uses_rfc3339_times() -> AppResult<()> {
    let ride = RideDetails {
        ride_no: 1,
        vehicle_id: Some("MV-1".to_owned()),
        start_time: "2024-11-20T10:00:00Z".to_owned(),
        end_time: "2024-11-20T10:45:30Z".to_owned(),
    };
    let duration = ride
        .duration()
        .ok_or_else(|| AppError::validation("Expected a duration"))?;
    if duration.num_seconds() != 2730 {
        return Err(AppError::validation(format!(
            "Unexpected duration {}s",
            duration.num_seconds()
        )));
    }
    let unparsable = RideDetails {
        end_time: "N/A".to_owned(),
        ..ride
    };
    if unparsable.duration().is_some() {
        return Err(AppError::validation("N/A should not parse"));
    }
    Ok(())
}
