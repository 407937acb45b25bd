//! Map drawing: the [`MapView`] primitives, the in-memory [`CanvasMap`] the
//! terminal draws, and the adapters that turn tracking steps and history
//! queries into layers.
mod adapter;
mod canvas;
mod heading;
mod overlay;
mod style;
mod view;

#[cfg(test)]
mod tests;

pub use adapter::{RendererAdapter, StepRenderer};
pub use canvas::{CanvasMap, Layer, MAX_LAYERS, Marker, MarkerKind, Polyline, Viewport};
pub use heading::heading_degrees;
pub use overlay::{
    END_LABEL, FleetOverlay, HistoryOverlay, START_LABEL, break_point_label, fleet_label,
};
pub use style::{
    ALERT_LINE, ALERT_RGB, HISTORY_LINE, HISTORY_RGB, INITIAL_CENTER, INITIAL_ZOOM, LINE_WEIGHT,
    LineStyle, MAX_ZOOM, MIN_ZOOM, PROGRESS_LINE, PROGRESS_RGB, TRACKING_ZOOM, break_label,
    segment_style,
};
pub use view::{LayerId, MapView};
