use crate::domain::Position;

/// Planar bearing from `from` to `to` in degrees, measured counter-clockwise
/// from east: `atan2(Δlat, Δlng)`. No great-circle correction is applied, so
/// the value drifts from the true bearing away from the equator and over long
/// segments; consecutive GPS samples are close enough for marker rotation.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "Coordinate deltas.")]
pub fn heading_degrees(from: Position, to: Position) -> f64 {
    let d_lat = to.latitude - from.latitude;
    let d_lng = to.longitude - from.longitude;
    d_lat.atan2(d_lng).to_degrees()
}
