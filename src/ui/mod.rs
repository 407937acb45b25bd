//! Terminal front end: a map canvas plus a status panel, redrawn from
//! [`UiData`] snapshots.
pub mod input;
pub mod model;
mod render;

#[cfg(test)]
mod tests;

pub use input::{KeyAction, key_action};
pub use model::{Notice, NoticeLevel, TrackingStatus, UiData};
pub use render::{Ui, UiActions, draw_frame, setup_render_ui};
