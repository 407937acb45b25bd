use std::collections::BTreeMap;

use crate::domain::{Bounds, Position, VehicleCategory};
use crate::error::RenderError;

use super::style::{INITIAL_CENTER, INITIAL_ZOOM, LineStyle, MAX_ZOOM, MIN_ZOOM};
use super::view::{LayerId, MapView};

/// Upper bound on live layers; a trace long enough to hit it is drawn
/// partially and the overflow is reported per layer.
pub const MAX_LAYERS: usize = 16_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Vehicle,
    Break,
    RouteStart,
    RouteEnd,
    Fleet(VehicleCategory),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Position,
    pub kind: MarkerKind,
    pub label: Option<String>,
    /// Rotation in degrees, see [`super::heading_degrees`].
    pub heading: Option<f64>,
}

impl Marker {
    #[must_use]
    pub const fn new(position: Position, kind: MarkerKind) -> Self {
        Self {
            position,
            kind,
            label: None,
            heading: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Position>,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Polyline(Polyline),
    Marker(Marker),
}

/// Visible lat/lng window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Viewport {
    /// Window around `center`; each zoom level halves the span, zoom 0 shows
    /// the whole globe horizontally.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "Span per zoom level.")]
    pub fn around(center: Position, zoom: u8) -> Self {
        let half_lng = 180.0 / 2f64.powi(i32::from(zoom));
        let half_lat = half_lng / 2.0;
        Self {
            west: center.longitude - half_lng,
            east: center.longitude + half_lng,
            south: center.latitude - half_lat,
            north: center.latitude + half_lat,
        }
    }

    #[must_use]
    pub fn contains(&self, bounds: &Bounds) -> bool {
        bounds.south_west.longitude >= self.west
            && bounds.north_east.longitude <= self.east
            && bounds.south_west.latitude >= self.south
            && bounds.north_east.latitude <= self.north
    }
}

/// In-memory map: the layer table the terminal canvas draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasMap {
    center: Position,
    zoom: u8,
    layers: BTreeMap<LayerId, Layer>,
    next_id: u64,
}

impl Default for CanvasMap {
    fn default() -> Self {
        Self {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            layers: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl CanvasMap {
    #[must_use]
    pub const fn center(&self) -> Position {
        self.center
    }

    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::around(self.center, self.zoom)
    }

    #[must_use]
    pub const fn layers(&self) -> &BTreeMap<LayerId, Layer> {
        &self.layers
    }

    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.layers.values().filter_map(|layer| match layer {
            Layer::Polyline(polyline) => Some(polyline),
            Layer::Marker(_) => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.layers.values().filter_map(|layer| match layer {
            Layer::Marker(marker) => Some(marker),
            Layer::Polyline(_) => None,
        })
    }

    fn insert(&mut self, layer: Layer) -> Result<LayerId, RenderError> {
        if self.layers.len() >= MAX_LAYERS {
            return Err(RenderError::LayerLimit { limit: MAX_LAYERS });
        }
        let id = LayerId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.layers.insert(id, layer);
        Ok(id)
    }

    fn marker_mut(&mut self, id: LayerId) -> Result<&mut Marker, RenderError> {
        match self.layers.get_mut(&id) {
            Some(Layer::Marker(marker)) => Ok(marker),
            Some(Layer::Polyline(_)) | None => Err(RenderError::UnknownLayer { id: id.get() }),
        }
    }
}

fn drawable(position: Position) -> Result<Position, RenderError> {
    if position.is_finite() {
        Ok(position)
    } else {
        Err(RenderError::InvalidPosition {
            latitude: position.latitude,
            longitude: position.longitude,
        })
    }
}

impl MapView for CanvasMap {
    fn set_view(&mut self, center: Position, zoom: u8) -> Result<(), RenderError> {
        self.center = drawable(center)?;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: Bounds) -> Result<(), RenderError> {
        drawable(bounds.south_west)?;
        drawable(bounds.north_east)?;
        let center = bounds.center();
        let zoom = (MIN_ZOOM..=MAX_ZOOM)
            .rev()
            .find(|zoom| Viewport::around(center, *zoom).contains(&bounds))
            .unwrap_or(MIN_ZOOM);
        self.center = center;
        self.zoom = zoom;
        Ok(())
    }

    fn add_polyline(
        &mut self,
        points: &[Position],
        style: LineStyle,
    ) -> Result<LayerId, RenderError> {
        if points.len() < 2 {
            return Err(RenderError::DegeneratePolyline {
                points: points.len(),
            });
        }
        let points = points
            .iter()
            .copied()
            .map(drawable)
            .collect::<Result<Vec<_>, _>>()?;
        self.insert(Layer::Polyline(Polyline { points, style }))
    }

    fn add_marker(&mut self, marker: Marker) -> Result<LayerId, RenderError> {
        drawable(marker.position)?;
        self.insert(Layer::Marker(marker))
    }

    fn move_marker(&mut self, id: LayerId, position: Position) -> Result<(), RenderError> {
        let position = drawable(position)?;
        self.marker_mut(id)?.position = position;
        Ok(())
    }

    fn rotate_marker(&mut self, id: LayerId, heading: f64) -> Result<(), RenderError> {
        self.marker_mut(id)?.heading = Some(heading);
        Ok(())
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<(), RenderError> {
        self.layers
            .remove(&id)
            .map(drop)
            .ok_or(RenderError::UnknownLayer { id: id.get() })
    }
}
