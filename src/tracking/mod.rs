//! Live-tracking replay engine: loads a vehicle's GPS trace and plays it
//! back one sample per tick through a [`crate::render::StepRenderer`].
mod controller;
mod phase;
mod route;
mod scheduler;
mod session;


pub use controller::{
    ControllerCommand, ControllerHandle, DEFAULT_COMPLETION_DELAY, DEFAULT_TICK_INTERVAL,
    PlaybackController, PlaybackSettings, spawn_controller,
};
pub use phase::{ButtonState, PauseResolution, Phase, PhaseEvent};
pub use route::{load_route, normalize_route, normalize_samples};
pub use scheduler::{Tick, TickKind, TickScheduler};
pub use session::{Step, TrackingSession};
