use crate::api::FleetApi;
use crate::args::FleetArgs;
use crate::domain::{VehicleCategory, VehicleRoster};
use crate::error::AppResult;
use crate::render::{FleetOverlay, fleet_label};

use super::report::Report;

const CATEGORIES: [VehicleCategory; 3] = [
    VehicleCategory::Moving,
    VehicleCategory::Free,
    VehicleCategory::Idle,
];

pub(super) async fn collect(api: &dyn FleetApi, args: &FleetArgs) -> AppResult<Report> {
    let (source, roster) = if args.snapshot {
        ("snapshot", api.fleet_snapshot().await?)
    } else {
        ("live", api.vehicle_roster().await?)
    };
    tracing::debug!(source, total = roster.total(), "Loaded fleet roster");

    let mut report = Report::new(format!("Fleet status ({source})"));
    count_lines(&mut report, &roster);
    report.line("");
    for category in CATEGORIES {
        report.line(id_line(&roster, category));
    }

    if let Some(category) = args.show {
        let vehicles = roster.category(category);
        let mut overlay = FleetOverlay::default();
        let placed = overlay.show(&mut report.map, category, vehicles)?;
        report.line("");
        report.line(format!(
            "{} vehicles on map: {placed} of {}",
            category.label(),
            vehicles.len()
        ));
        for vehicle in vehicles {
            match vehicle.position {
                Some(position) => report.line(format!(
                    "{} at {}, {}",
                    fleet_label(vehicle, category),
                    position.latitude,
                    position.longitude
                )),
                None => report.line(format!(
                    "{} (no position)",
                    fleet_label(vehicle, category)
                )),
            }
        }
    }

    Ok(report)
}

fn count_lines(report: &mut Report, roster: &VehicleRoster) {
    report.line(format!("Total: {}", roster.total()));
    for category in CATEGORIES {
        report.line(format!(
            "{}: {}",
            category.label(),
            roster.category(category).len()
        ));
    }
}

fn id_line(roster: &VehicleRoster, category: VehicleCategory) -> String {
    let ids = roster
        .category(category)
        .iter()
        .map(|vehicle| vehicle.vehicle_id.as_str())
        .collect::<Vec<_>>();
    if ids.is_empty() {
        format!("{} vehicles: none", category.label())
    } else {
        format!("{} vehicles: {}", category.label(), ids.join(", "))
    }
}
