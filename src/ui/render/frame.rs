use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::{Backend, Frame},
    widgets::Block,
};

use crate::ui::model::UiData;

use super::map::render_map;
use super::panel::{render_help, render_info, render_status};
use super::theme::{
    HELP_HEIGHT, MAP_MIN_WIDTH, SIDE_PANEL_WIDTH, STATUS_HEIGHT, UI_MARGIN,
    app_background_style,
};

pub fn draw_frame<B: Backend>(f: &mut Frame<'_, B>, data: &UiData) {
    let size = f.size();
    f.render_widget(
        Block::default().style(app_background_style(data.no_color)),
        size,
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(UI_MARGIN)
        .constraints([
            Constraint::Min(MAP_MIN_WIDTH),
            Constraint::Length(SIDE_PANEL_WIDTH),
        ])
        .split(size);

    let (map_chunk, side_chunk) = match columns.as_ref() {
        [a, b] => (a, b),
        _ => return,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(HELP_HEIGHT),
        ])
        .split(*side_chunk);

    let (status_chunk, info_chunk, help_chunk) = match rows.as_ref() {
        [a, b, c] => (a, b, c),
        _ => return,
    };

    render_map(f, data, *map_chunk);
    render_status(f, data, *status_chunk);
    render_info(f, data, *info_chunk);
    render_help(f, data, *help_chunk);
}
