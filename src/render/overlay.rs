use crate::domain::{Bounds, RoutePoint, Vehicle, VehicleCategory};
use crate::error::{AppError, AppResult, DataError};

use super::canvas::{Marker, MarkerKind};
use super::style::HISTORY_LINE;
use super::view::{LayerId, MapView};

pub const START_LABEL: &str = "Start Location";
pub const END_LABEL: &str = "End Location";

/// Layers of a past ride drawn on top of the map.
#[derive(Debug, Default)]
pub struct HistoryOverlay {
    layers: Vec<LayerId>,
}

impl HistoryOverlay {
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Removes the layers drawn by a previous call.
    pub fn clear<M: MapView>(&mut self, map: &mut M) {
        clear_layers(map, &mut self.layers);
    }

    /// Draws a full ride: the path, its start and end markers, and fits the
    /// view to it.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NoRoute`] for an empty route and map errors
    /// unchanged.
    pub fn draw_route<M: MapView>(
        &mut self,
        map: &mut M,
        ride_no: u32,
        route: &[RoutePoint],
    ) -> AppResult<()> {
        self.clear(map);
        let (Some(first), Some(last)) = (route.first(), route.last()) else {
            return Err(AppError::data(DataError::NoRoute {
                ride_no,
                filter: "ride",
            }));
        };

        let path = route
            .iter()
            .map(|point| point.sample.position())
            .collect::<Vec<_>>();
        if path.len() >= 2 {
            self.layers.push(map.add_polyline(&path, HISTORY_LINE)?);
        }
        self.layers.push(map.add_marker(
            Marker::new(first.sample.position(), MarkerKind::RouteStart).with_label(START_LABEL),
        )?);
        self.layers.push(map.add_marker(
            Marker::new(last.sample.position(), MarkerKind::RouteEnd).with_label(END_LABEL),
        )?);
        if let Some(bounds) = Bounds::enclosing(path) {
            map.fit_bounds(bounds)?;
        }
        Ok(())
    }

    /// Places a labelled marker on every break sample of a ride and returns
    /// how many were drawn.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NoBreakPoints`] when the ride has no break
    /// samples and map errors unchanged.
    pub fn draw_break_points<M: MapView>(
        &mut self,
        map: &mut M,
        ride_no: u32,
        route: &[RoutePoint],
    ) -> AppResult<usize> {
        self.clear(map);
        let breaks = route
            .iter()
            .filter(|point| point.sample.status.is_break())
            .collect::<Vec<_>>();
        if breaks.is_empty() {
            return Err(AppError::data(DataError::NoBreakPoints { ride_no }));
        }

        for point in &breaks {
            let marker = Marker::new(point.sample.position(), MarkerKind::Break)
                .with_label(break_point_label(point));
            self.layers.push(map.add_marker(marker)?);
        }
        if let Some(bounds) = Bounds::enclosing(breaks.iter().map(|point| point.sample.position()))
        {
            map.fit_bounds(bounds)?;
        }
        Ok(breaks.len())
    }
}

#[must_use]
pub fn break_point_label(point: &RoutePoint) -> String {
    format!("Break at {}", point.timestamp.as_deref().unwrap_or("N/A"))
}

/// Status markers for one vehicle category of the fleet.
#[derive(Debug, Default)]
pub struct FleetOverlay {
    layers: Vec<LayerId>,
    category: Option<VehicleCategory>,
}

impl FleetOverlay {
    #[must_use]
    pub const fn category(&self) -> Option<VehicleCategory> {
        self.category
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn clear<M: MapView>(&mut self, map: &mut M) {
        clear_layers(map, &mut self.layers);
        self.category = None;
    }

    /// Replaces the markers of the previously shown category with one marker
    /// per vehicle of `category`. Vehicles without a position are skipped.
    ///
    /// # Errors
    ///
    /// Returns map errors unchanged.
    pub fn show<M: MapView>(
        &mut self,
        map: &mut M,
        category: VehicleCategory,
        vehicles: &[Vehicle],
    ) -> AppResult<usize> {
        self.clear(map);
        for vehicle in vehicles {
            let Some(position) = vehicle.position else {
                tracing::warn!(
                    vehicle_id = %vehicle.vehicle_id,
                    category = category.label(),
                    "Vehicle has no position"
                );
                continue;
            };
            let marker = Marker::new(position, MarkerKind::Fleet(category))
                .with_label(fleet_label(vehicle, category));
            self.layers.push(map.add_marker(marker)?);
        }
        self.category = Some(category);
        Ok(self.layers.len())
    }
}

#[must_use]
pub fn fleet_label(vehicle: &Vehicle, category: VehicleCategory) -> String {
    format!(
        "Vehicle ID: {} / Status: {}",
        vehicle.vehicle_id,
        category.label()
    )
}

fn clear_layers<M: MapView>(map: &mut M, layers: &mut Vec<LayerId>) {
    for id in layers.drain(..) {
        if let Err(err) = map.remove_layer(id) {
            tracing::warn!(error = %err, "Failed to remove overlay layer");
        }
    }
}
