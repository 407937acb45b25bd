use tokio::sync::watch;

use crate::domain::{
    Bounds, GpsSample, Position, RoutePoint, SampleStatus, Vehicle, VehicleCategory,
};
use crate::error::{AppError, AppResult, ErrorKind, RenderError};

use super::{
    ALERT_LINE, CanvasMap, FleetOverlay, HISTORY_LINE, HistoryOverlay, LayerId, Layer, LineStyle,
    MapView, Marker, MarkerKind, PROGRESS_LINE, RendererAdapter, StepRenderer, TRACKING_ZOOM,
    heading_degrees,
};

/// Wraps a [`CanvasMap`] and counts removals.
#[derive(Debug, Default)]
struct CountingMap {
    inner: CanvasMap,
    removals: usize,
}

impl MapView for CountingMap {
    fn set_view(&mut self, center: Position, zoom: u8) -> Result<(), RenderError> {
        self.inner.set_view(center, zoom)
    }

    fn fit_bounds(&mut self, bounds: Bounds) -> Result<(), RenderError> {
        self.inner.fit_bounds(bounds)
    }

    fn add_polyline(
        &mut self,
        points: &[Position],
        style: LineStyle,
    ) -> Result<LayerId, RenderError> {
        self.inner.add_polyline(points, style)
    }

    fn add_marker(&mut self, marker: Marker) -> Result<LayerId, RenderError> {
        self.inner.add_marker(marker)
    }

    fn move_marker(&mut self, id: LayerId, position: Position) -> Result<(), RenderError> {
        self.inner.move_marker(id, position)
    }

    fn rotate_marker(&mut self, id: LayerId, heading: f64) -> Result<(), RenderError> {
        self.inner.rotate_marker(id, heading)
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<(), RenderError> {
        self.removals = self.removals.saturating_add(1);
        self.inner.remove_layer(id)
    }
}

/// A backend that rejects everything.
#[derive(Debug, Default)]
struct BrokenMap;

impl MapView for BrokenMap {
    fn set_view(&mut self, _center: Position, _zoom: u8) -> Result<(), RenderError> {
        Err(RenderError::Detached)
    }

    fn fit_bounds(&mut self, _bounds: Bounds) -> Result<(), RenderError> {
        Err(RenderError::Detached)
    }

    fn add_polyline(
        &mut self,
        _points: &[Position],
        _style: LineStyle,
    ) -> Result<LayerId, RenderError> {
        Err(RenderError::Detached)
    }

    fn add_marker(&mut self, _marker: Marker) -> Result<LayerId, RenderError> {
        Err(RenderError::Detached)
    }

    fn move_marker(&mut self, _id: LayerId, _position: Position) -> Result<(), RenderError> {
        Err(RenderError::Detached)
    }

    fn rotate_marker(&mut self, _id: LayerId, _heading: f64) -> Result<(), RenderError> {
        Err(RenderError::Detached)
    }

    fn remove_layer(&mut self, _id: LayerId) -> Result<(), RenderError> {
        Err(RenderError::Detached)
    }
}

const fn normal(latitude: f64, longitude: f64) -> GpsSample {
    GpsSample::new(latitude, longitude, SampleStatus::Normal)
}

const fn on_break(latitude: f64, longitude: f64) -> GpsSample {
    GpsSample::new(latitude, longitude, SampleStatus::Break)
}

fn rounded(value: f64) -> i64 {
    value.round() as i64
}

fn vehicle_marker(map: &CanvasMap) -> AppResult<&Marker> {
    map.markers()
        .find(|marker| marker.kind == MarkerKind::Vehicle)
        .ok_or_else(|| AppError::validation("Expected a vehicle marker"))
}

#[test]
fn heading_matches_planar_bearing() -> AppResult<()> {
    let origin = Position::new(0.0, 0.0);
    let cases = [
        (Position::new(1.0, 1.0), 45),
        (Position::new(0.0, 1.0), 0),
        (Position::new(1.0, 0.0), 90),
        (Position::new(0.0, -1.0), 180),
    ];
    for (target, expected) in cases {
        let heading = rounded(heading_degrees(origin, target));
        if heading != expected {
            return Err(AppError::validation(format!(
                "Expected heading {expected}, got {heading}"
            )));
        }
    }
    Ok(())
}

#[test]
fn first_step_centers_view_and_draws_progress_segment() -> AppResult<()> {
    let mut adapter = RendererAdapter::new(CanvasMap::default());
    let current = normal(26.49, 80.28);
    let next = normal(26.50, 80.29);
    adapter.render_step(&current, Some(&next), true);

    let map = adapter.map();
    if map.zoom() != TRACKING_ZOOM || map.center() != current.position() {
        return Err(AppError::validation("First step should center on the vehicle"));
    }
    let lines = map.polylines().collect::<Vec<_>>();
    match lines.as_slice() {
        [line] if line.style == PROGRESS_LINE => {}
        _ => return Err(AppError::validation("Expected one progress segment")),
    }
    let vehicle = vehicle_marker(map)?;
    if vehicle.position != current.position() || vehicle.heading.map(rounded) != Some(45) {
        return Err(AppError::validation(format!(
            "Unexpected vehicle marker {vehicle:?}"
        )));
    }
    Ok(())
}

#[test]
fn break_step_draws_alert_segment_and_labelled_marker() -> AppResult<()> {
    let mut adapter = RendererAdapter::new(CanvasMap::default());
    let current = on_break(26.5, 80.3);
    adapter.render_step(&current, Some(&normal(26.5, 80.31)), false);

    let map = adapter.map();
    if map.zoom() == TRACKING_ZOOM {
        return Err(AppError::validation("Only the first step should zoom"));
    }
    if !map.polylines().all(|line| line.style == ALERT_LINE) {
        return Err(AppError::validation("Break segment should use the alert color"));
    }
    let label = map
        .markers()
        .find(|marker| marker.kind == MarkerKind::Break)
        .and_then(|marker| marker.label.clone())
        .ok_or_else(|| AppError::validation("Expected a break marker"))?;
    if label != "Status: Break / Location: 26.5, 80.3" {
        return Err(AppError::validation(format!("Unexpected label {label}")));
    }
    Ok(())
}

#[test]
fn final_step_moves_vehicle_without_segment() -> AppResult<()> {
    let mut adapter = RendererAdapter::new(CanvasMap::default());
    let first = normal(26.49, 80.28);
    let last = normal(26.50, 80.29);
    adapter.render_step(&first, Some(&last), true);
    adapter.render_step(&last, None, false);

    let map = adapter.map();
    if map.polylines().count() != 1 {
        return Err(AppError::validation("Last step must not draw a segment"));
    }
    if vehicle_marker(map)?.position != last.position() {
        return Err(AppError::validation("Vehicle should sit on the last sample"));
    }
    if map.markers().filter(|marker| marker.kind == MarkerKind::Vehicle).count() != 1 {
        return Err(AppError::validation("Vehicle marker should be reused"));
    }
    Ok(())
}

#[test]
fn reset_view_removes_owned_layers_once() -> AppResult<()> {
    let mut adapter = RendererAdapter::new(CountingMap::default());
    adapter.render_step(&normal(26.49, 80.28), Some(&on_break(26.5, 80.29)), true);
    adapter.render_step(&on_break(26.5, 80.29), Some(&normal(26.51, 80.3)), false);
    let owned = adapter.owned_layers();
    if owned != 4 {
        return Err(AppError::validation(format!("Expected 4 owned layers, got {owned}")));
    }

    adapter.reset_view();
    if adapter.map().removals != owned || adapter.map().inner.layer_count() != 0 {
        return Err(AppError::validation("Reset should remove every owned layer"));
    }
    adapter.reset_view();
    if adapter.map().removals != owned {
        return Err(AppError::validation("Second reset should be a no-op"));
    }
    Ok(())
}

#[test]
fn reset_view_leaves_foreign_layers() -> AppResult<()> {
    let mut map = CanvasMap::default();
    let foreign = map.add_marker(Marker::new(
        Position::new(26.47, 80.33),
        MarkerKind::Fleet(VehicleCategory::Free),
    ))?;
    let mut adapter = RendererAdapter::new(map);
    adapter.render_step(&normal(26.49, 80.28), Some(&normal(26.5, 80.29)), true);
    adapter.reset_view();

    let map = adapter.into_map();
    if map.layer_count() != 1 || map.layer(foreign).is_none() {
        return Err(AppError::validation("Fleet marker should survive a reset"));
    }
    Ok(())
}

#[test]
fn map_failures_do_not_escape_the_adapter() -> AppResult<()> {
    let mut adapter = RendererAdapter::new(BrokenMap);
    adapter.render_step(&on_break(26.49, 80.28), Some(&normal(26.5, 80.29)), true);
    adapter.reset_view();
    if adapter.owned_layers() != 0 {
        return Err(AppError::validation("Nothing should be owned after failures"));
    }
    Ok(())
}

#[test]
fn canvas_rejects_unusable_geometry() -> AppResult<()> {
    let mut map = CanvasMap::default();
    let single = map.add_polyline(&[Position::new(26.4, 80.2)], PROGRESS_LINE);
    if !matches!(single, Err(RenderError::DegeneratePolyline { points: 1 })) {
        return Err(AppError::validation("Single point polyline should be rejected"));
    }
    let nan = map.add_marker(Marker::new(
        Position::new(f64::NAN, 80.2),
        MarkerKind::Vehicle,
    ));
    if !matches!(nan, Err(RenderError::InvalidPosition { .. })) {
        return Err(AppError::validation("NaN marker should be rejected"));
    }
    let missing = map.remove_layer(LayerId::new(99));
    if !matches!(missing, Err(RenderError::UnknownLayer { id: 99 })) {
        return Err(AppError::validation("Unknown layer should be reported"));
    }
    Ok(())
}

#[test]
fn fit_bounds_uses_tightest_zoom_that_contains_the_box() -> AppResult<()> {
    let mut map = CanvasMap::default();
    let bounds = Bounds {
        south_west: Position::new(26.40, 80.20),
        north_east: Position::new(26.60, 80.40),
    };
    map.fit_bounds(bounds)?;
    if !map.viewport().contains(&bounds) {
        return Err(AppError::validation("Viewport should contain the bounds"));
    }
    let closer = super::Viewport::around(map.center(), map.zoom().saturating_add(1));
    if closer.contains(&bounds) {
        return Err(AppError::validation("A closer zoom would still fit"));
    }
    Ok(())
}

#[test]
fn watch_backed_map_publishes_updates() -> AppResult<()> {
    let (tx, mut rx) = watch::channel(CanvasMap::default());
    let mut adapter = RendererAdapter::new(tx);
    adapter.render_step(&normal(26.49, 80.28), Some(&normal(26.5, 80.29)), true);

    if !rx.has_changed().unwrap_or(false) {
        return Err(AppError::validation("Receiver should see the new step"));
    }
    if rx.borrow_and_update().layer_count() != 2 {
        return Err(AppError::validation("Expected vehicle marker and segment"));
    }
    Ok(())
}

fn route_point(latitude: f64, longitude: f64, status: SampleStatus, at: &str) -> RoutePoint {
    RoutePoint {
        sample: GpsSample::new(latitude, longitude, status),
        timestamp: Some(at.to_owned()),
    }
}

fn sample_route() -> Vec<RoutePoint> {
    vec![
        route_point(26.49, 80.28, SampleStatus::Normal, "2024-11-20T10:00:00"),
        route_point(26.50, 80.29, SampleStatus::Break, "2024-11-20T10:05:00"),
        route_point(26.51, 80.30, SampleStatus::Normal, "2024-11-20T10:10:00"),
    ]
}

#[test]
fn history_route_draws_path_with_endpoints() -> AppResult<()> {
    let mut map = CanvasMap::default();
    let mut overlay = HistoryOverlay::default();
    overlay.draw_route(&mut map, 7, &sample_route())?;
    overlay.draw_route(&mut map, 7, &sample_route())?;

    if map.layer_count() != 3 || overlay.len() != 3 {
        return Err(AppError::validation("Redraw should replace the previous route"));
    }
    if !map.polylines().all(|line| line.style == HISTORY_LINE && line.points.len() == 3) {
        return Err(AppError::validation("Expected one history polyline"));
    }
    let labels = map
        .markers()
        .filter_map(|marker| marker.label.as_deref())
        .collect::<Vec<_>>();
    if labels != ["Start Location", "End Location"] {
        return Err(AppError::validation(format!("Unexpected labels {labels:?}")));
    }
    Ok(())
}

#[test]
fn history_break_points_are_labelled_with_time() -> AppResult<()> {
    let mut map = CanvasMap::default();
    let mut overlay = HistoryOverlay::default();
    let drawn = overlay.draw_break_points(&mut map, 7, &sample_route())?;
    let label = map.markers().find_map(|marker| marker.label.clone());
    if drawn != 1 || label.as_deref() != Some("Break at 2024-11-20T10:05:00") {
        return Err(AppError::validation(format!("Unexpected break marker {label:?}")));
    }
    Ok(())
}

#[test]
fn history_without_breaks_reports_no_data() -> AppResult<()> {
    let mut map = CanvasMap::default();
    let mut overlay = HistoryOverlay::default();
    let route = vec![route_point(26.49, 80.28, SampleStatus::Normal, "t0")];
    let err = overlay
        .draw_break_points(&mut map, 7, &route)
        .err()
        .ok_or_else(|| AppError::validation("Expected an error"))?;
    if err.kind() != ErrorKind::NoData {
        return Err(AppError::validation(format!("Unexpected error {err}")));
    }
    let empty = overlay.draw_route(&mut map, 7, &[]);
    if !empty.is_err_and(|err| err.kind() == ErrorKind::NoData) {
        return Err(AppError::validation("Empty route should be NoData"));
    }
    Ok(())
}

#[test]
fn fleet_overlay_replaces_previous_category() -> AppResult<()> {
    let (tx, rx) = watch::channel(CanvasMap::default());
    let mut adapter = RendererAdapter::new(tx);
    adapter.render_step(&normal(26.49, 80.28), None, true);

    let free = vec![
        Vehicle {
            vehicle_id: "FR-1".to_owned(),
            position: Some(Position::new(26.47, 80.33)),
        },
        Vehicle {
            vehicle_id: "FR-2".to_owned(),
            position: None,
        },
    ];
    let idle = vec![Vehicle {
        vehicle_id: "ID-1".to_owned(),
        position: Some(Position::new(26.45, 80.31)),
    }];

    let mut overlay = FleetOverlay::default();
    let shown = overlay.show(adapter.map_mut(), VehicleCategory::Free, &free)?;
    if shown != 1 {
        return Err(AppError::validation("Vehicle without position should be skipped"));
    }
    overlay.show(adapter.map_mut(), VehicleCategory::Idle, &idle)?;

    let map = rx.borrow();
    let labels = map
        .layers()
        .values()
        .filter_map(|layer| match layer {
            Layer::Marker(marker) => marker.label.clone(),
            Layer::Polyline(_) => None,
        })
        .collect::<Vec<_>>();
    if labels != ["Vehicle ID: ID-1 / Status: Idle"] {
        return Err(AppError::validation(format!("Unexpected labels {labels:?}")));
    }
    if vehicle_marker(&map).is_err() {
        return Err(AppError::validation("Tracked vehicle marker must be untouched"));
    }
    Ok(())
}
