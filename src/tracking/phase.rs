use std::fmt;

use crate::error::ErrorKind;

/// Lifecycle of the tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Tracking,
    Paused,
    Completed,
    /// Transient: announced on cancel, immediately followed by `Idle`.
    Cancelled,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Tracking => "tracking",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
            Phase::Cancelled => "cancelled",
        }
    }

    /// How the tracking button presents itself in this phase.
    #[must_use]
    pub const fn button(self) -> ButtonState {
        match self {
            Phase::Idle | Phase::Cancelled => ButtonState {
                label: "Start Tracking",
                color: None,
            },
            Phase::Tracking => ButtonState {
                label: "Tracking...",
                color: Some(BUTTON_TRACKING_RGB),
            },
            Phase::Paused => ButtonState {
                label: "Resume Tracking",
                color: Some(BUTTON_PAUSED_RGB),
            },
            Phase::Completed => ButtonState {
                label: "Ride Completed",
                color: Some(BUTTON_COMPLETED_RGB),
            },
        }
    }

    /// True while a session holds points (tracking or paused).
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Phase::Tracking | Phase::Paused)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const BUTTON_TRACKING_RGB: (u8, u8, u8) = (0x25, 0x63, 0xeb);
const BUTTON_PAUSED_RGB: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);
const BUTTON_COMPLETED_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub label: &'static str,
    /// `None` keeps the default button color.
    pub color: Option<(u8, u8, u8)>,
}

/// Answer to the "resume or cancel?" prompt when toggling a paused session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseResolution {
    #[default]
    Resume,
    Cancel,
}

/// Notifications broadcast to controller subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseEvent {
    Changed {
        from: Phase,
        to: Phase,
    },
    /// A render step finished; `cursor` counts the steps taken so far.
    Step {
        cursor: usize,
        total: usize,
    },
    Completed {
        vehicle_id: String,
        steps: usize,
    },
    /// A controller operation failed; the phase is left as it was.
    Failed {
        kind: ErrorKind,
        message: String,
    },
}
