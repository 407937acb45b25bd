use crate::domain::{Position, SampleStatus};

pub const INITIAL_CENTER: Position = Position::new(26.4915, 80.2846);
pub const INITIAL_ZOOM: u8 = 13;
/// Zoom applied on the first tracking step.
pub const TRACKING_ZOOM: u8 = 16;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;
pub const LINE_WEIGHT: u8 = 4;

pub const PROGRESS_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);
pub const ALERT_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);
pub const HISTORY_RGB: (u8, u8, u8) = (0x3b, 0x82, 0xf6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: (u8, u8, u8),
    pub weight: u8,
}

pub const PROGRESS_LINE: LineStyle = LineStyle {
    color: PROGRESS_RGB,
    weight: LINE_WEIGHT,
};
pub const ALERT_LINE: LineStyle = LineStyle {
    color: ALERT_RGB,
    weight: LINE_WEIGHT,
};
pub const HISTORY_LINE: LineStyle = LineStyle {
    color: HISTORY_RGB,
    weight: LINE_WEIGHT,
};

/// Color of the segment leaving a sample with `status`.
#[must_use]
pub const fn segment_style(status: SampleStatus) -> LineStyle {
    match status {
        SampleStatus::Break => ALERT_LINE,
        SampleStatus::Normal => PROGRESS_LINE,
    }
}

#[must_use]
pub fn break_label(position: Position) -> String {
    format!(
        "Status: Break / Location: {}, {}",
        position.latitude, position.longitude
    )
}
