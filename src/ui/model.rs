use crate::render::CanvasMap;
use crate::tracking::Phase;

/// Everything one frame shows. Published through a `watch` channel; the render
/// task redraws on every change.
#[derive(Debug, Clone, Default)]
pub struct UiData {
    pub title: String,
    pub map: CanvasMap,
    /// `None` outside the track command; hides the tracking button.
    pub tracking: Option<TrackingStatus>,
    /// Transient message such as a fetch failure or the pause prompt.
    pub notice: Option<Notice>,
    /// Free-form side panel lines (counts, ride times, vehicle lists).
    pub info: Vec<String>,
    pub help: &'static str,
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingStatus {
    pub vehicle_id: String,
    pub phase: Phase,
    pub cursor: usize,
    pub total: usize,
}

impl TrackingStatus {
    #[must_use]
    pub fn new(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            phase: Phase::Idle,
            cursor: 0,
            total: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}
