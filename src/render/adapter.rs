use crate::domain::{GpsSample, Position};
use crate::error::RenderError;

use super::canvas::{Marker, MarkerKind};
use super::heading::heading_degrees;
use super::style::{TRACKING_ZOOM, break_label, segment_style};
use super::view::{LayerId, MapView};

/// Receives playback steps from the tracking controller.
pub trait StepRenderer: Send {
    /// Draws one step: `current` is the sample being reached, `next` the one
    /// after it, if any.
    fn render_step(&mut self, current: &GpsSample, next: Option<&GpsSample>, is_first: bool);

    /// Removes everything drawn so far. Calling it again is a no-op.
    fn reset_view(&mut self);
}

/// Draws tracking steps onto a [`MapView`] and remembers every layer it
/// added, so [`StepRenderer::reset_view`] never touches layers owned by
/// other views.
///
/// Map failures are logged and swallowed: a missed segment must not stop
/// playback.
#[derive(Debug)]
pub struct RendererAdapter<M> {
    map: M,
    vehicle: Option<LayerId>,
    drawn: Vec<LayerId>,
}

impl<M> RendererAdapter<M>
where
    M: MapView,
{
    #[must_use]
    pub const fn new(map: M) -> Self {
        Self {
            map,
            vehicle: None,
            drawn: Vec::new(),
        }
    }

    #[must_use]
    pub const fn map(&self) -> &M {
        &self.map
    }

    pub const fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    #[must_use]
    pub fn into_map(self) -> M {
        self.map
    }

    #[must_use]
    pub const fn vehicle_marker(&self) -> Option<LayerId> {
        self.vehicle
    }

    /// Layers currently owned, vehicle marker included.
    #[must_use]
    pub fn owned_layers(&self) -> usize {
        self.drawn
            .len()
            .saturating_add(usize::from(self.vehicle.is_some()))
    }

    fn place_vehicle(&mut self, position: Position) -> Option<LayerId> {
        if let Some(id) = self.vehicle
            && logged(self.map.move_marker(id, position), "move vehicle").is_some()
        {
            return Some(id);
        }
        self.vehicle = logged(
            self.map
                .add_marker(Marker::new(position, MarkerKind::Vehicle)),
            "place vehicle",
        );
        self.vehicle
    }
}

impl<M> StepRenderer for RendererAdapter<M>
where
    M: MapView,
{
    fn render_step(&mut self, current: &GpsSample, next: Option<&GpsSample>, is_first: bool) {
        let position = current.position();
        let vehicle = self.place_vehicle(position);
        if is_first {
            logged(self.map.set_view(position, TRACKING_ZOOM), "center view");
        }

        if let Some(next) = next {
            let target = next.position();
            if let Some(vehicle) = vehicle {
                let heading = heading_degrees(position, target);
                logged(self.map.rotate_marker(vehicle, heading), "rotate vehicle");
            }
            let segment = self
                .map
                .add_polyline(&[position, target], segment_style(current.status));
            if let Some(id) = logged(segment, "draw segment") {
                self.drawn.push(id);
            }
        }

        if current.status.is_break() {
            let marker = Marker::new(position, MarkerKind::Break).with_label(break_label(position));
            if let Some(id) = logged(self.map.add_marker(marker), "place break marker") {
                self.drawn.push(id);
            }
        }
    }

    fn reset_view(&mut self) {
        let vehicle = self.vehicle.take();
        for id in self.drawn.drain(..).chain(vehicle) {
            logged(self.map.remove_layer(id), "remove layer");
        }
    }
}

fn logged<T>(result: Result<T, RenderError>, action: &'static str) -> Option<T> {
    result
        .inspect_err(|err| tracing::warn!(action, error = %err, "Map update failed"))
        .ok()
}
