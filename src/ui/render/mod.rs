mod dashboard;
mod frame;
mod lifecycle;
mod map;
mod panel;
mod progress;
mod theme;

pub use dashboard::{Ui, UiActions};
pub use frame::draw_frame;
pub use lifecycle::setup_render_ui;
