use crate::domain::GpsSample;

use super::phase::Phase;

/// The single tracking session owned by the playback controller.
///
/// `cursor` counts the samples already rendered, so `0 <= cursor <= len`
/// always holds and the next sample to render is `points[cursor]`.
#[derive(Debug, Clone, Default)]
pub struct TrackingSession {
    vehicle_id: Option<String>,
    points: Vec<GpsSample>,
    cursor: usize,
    phase: Phase,
    last_point: Option<GpsSample>,
}

/// One playback step handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub current: GpsSample,
    pub next: Option<GpsSample>,
    pub is_first: bool,
}

impl TrackingSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vehicle_id: None,
            points: Vec::new(),
            cursor: 0,
            phase: Phase::Idle,
            last_point: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[GpsSample] {
        &self.points
    }

    #[must_use]
    pub fn vehicle_id(&self) -> Option<&str> {
        self.vehicle_id.as_deref()
    }

    /// Last rendered sample. Survives completion so a restart on the same
    /// vehicle continues the drawn path from it.
    #[must_use]
    pub const fn last_point(&self) -> Option<GpsSample> {
        self.last_point
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.points.len()
    }

    pub(super) const fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Drops the points and rewinds the cursor, keeping the last point.
    pub(super) fn rewind(&mut self) {
        self.points.clear();
        self.cursor = 0;
    }

    /// Installs a freshly loaded trace. When the previous session tracked the
    /// same vehicle, its last point is prepended unless the trace already
    /// starts there.
    pub(super) fn load(&mut self, vehicle_id: &str, mut points: Vec<GpsSample>) {
        let carried = match (self.vehicle_id.as_deref(), self.last_point) {
            (Some(previous), Some(last)) if previous == vehicle_id => Some(last),
            (Some(_) | None, Some(_) | None) => None,
        };
        if let Some(last) = carried
            && points.first() != Some(&last)
        {
            points.insert(0, last);
        }
        if carried.is_none() {
            self.last_point = None;
        }
        self.vehicle_id = Some(vehicle_id.to_owned());
        self.points = points;
        self.cursor = 0;
    }

    /// Takes the sample at the cursor and advances past it.
    pub(super) fn step(&mut self) -> Option<Step> {
        let current = *self.points.get(self.cursor)?;
        let next_index = self.cursor.saturating_add(1);
        let step = Step {
            current,
            next: self.points.get(next_index).copied(),
            is_first: self.cursor == 0,
        };
        self.cursor = next_index;
        self.last_point = Some(current);
        Some(step)
    }

    /// Forgets everything, including the last point.
    pub(super) fn discard(&mut self) {
        self.points.clear();
        self.cursor = 0;
        self.last_point = None;
    }
}
