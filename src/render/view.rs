use tokio::sync::watch;

use crate::domain::{Bounds, Position};
use crate::error::RenderError;

use super::canvas::{CanvasMap, Marker};
use super::style::LineStyle;

/// Handle of a layer added to a [`MapView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

impl LayerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The drawing primitives of a slippy map.
///
/// Every method reports backend failures; callers decide whether to surface
/// or swallow them.
pub trait MapView: Send {
    /// Centers the view on `center` at `zoom`.
    ///
    /// # Errors
    ///
    /// Returns an error when `center` is not a finite coordinate.
    fn set_view(&mut self, center: Position, zoom: u8) -> Result<(), RenderError>;

    /// Moves and zooms the view so `bounds` is fully visible.
    ///
    /// # Errors
    ///
    /// Returns an error when a corner is not a finite coordinate.
    fn fit_bounds(&mut self, bounds: Bounds) -> Result<(), RenderError>;

    /// # Errors
    ///
    /// Returns an error for fewer than two points, non-finite points, or a
    /// full layer table.
    fn add_polyline(&mut self, points: &[Position], style: LineStyle)
    -> Result<LayerId, RenderError>;

    /// # Errors
    ///
    /// Returns an error for a non-finite position or a full layer table.
    fn add_marker(&mut self, marker: Marker) -> Result<LayerId, RenderError>;

    /// # Errors
    ///
    /// Returns an error when `id` is not a marker on this map or `position`
    /// is not finite.
    fn move_marker(&mut self, id: LayerId, position: Position) -> Result<(), RenderError>;

    /// # Errors
    ///
    /// Returns an error when `id` is not a marker on this map.
    fn rotate_marker(&mut self, id: LayerId, heading: f64) -> Result<(), RenderError>;

    /// # Errors
    ///
    /// Returns an error when `id` is not on this map.
    fn remove_layer(&mut self, id: LayerId) -> Result<(), RenderError>;
}

/// Drawing into a watch channel publishes every change to the UI.
impl MapView for watch::Sender<CanvasMap> {
    fn set_view(&mut self, center: Position, zoom: u8) -> Result<(), RenderError> {
        modify(self, |map| map.set_view(center, zoom))
    }

    fn fit_bounds(&mut self, bounds: Bounds) -> Result<(), RenderError> {
        modify(self, |map| map.fit_bounds(bounds))
    }

    fn add_polyline(
        &mut self,
        points: &[Position],
        style: LineStyle,
    ) -> Result<LayerId, RenderError> {
        modify(self, |map| map.add_polyline(points, style))
    }

    fn add_marker(&mut self, marker: Marker) -> Result<LayerId, RenderError> {
        modify(self, |map| map.add_marker(marker))
    }

    fn move_marker(&mut self, id: LayerId, position: Position) -> Result<(), RenderError> {
        modify(self, |map| map.move_marker(id, position))
    }

    fn rotate_marker(&mut self, id: LayerId, heading: f64) -> Result<(), RenderError> {
        modify(self, |map| map.rotate_marker(id, heading))
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<(), RenderError> {
        modify(self, |map| map.remove_layer(id))
    }
}

fn modify<T, F>(tx: &watch::Sender<CanvasMap>, op: F) -> Result<T, RenderError>
where
    F: FnOnce(&mut CanvasMap) -> Result<T, RenderError>,
{
    let mut outcome = None;
    tx.send_if_modified(|map| {
        let result = op(map);
        let changed = result.is_ok();
        outcome = Some(result);
        changed
    });
    outcome.unwrap_or(Err(RenderError::Detached))
}
