use ratatui::style::{Color, Modifier, Style};

use crate::ui::model::NoticeLevel;

pub(super) const UI_MARGIN: u16 = 1;
pub(super) const SIDE_PANEL_WIDTH: u16 = 44;
pub(super) const MAP_MIN_WIDTH: u16 = 20;
pub(super) const STATUS_HEIGHT: u16 = 7;
pub(super) const HELP_HEIGHT: u16 = 3;
pub(super) const MAP_BG_RGB: (u8, u8, u8) = (0x0a, 0x0a, 0x0a);
pub(super) const PANEL_BORDER_RGB: (u8, u8, u8) = (0xe5, 0xe7, 0xeb);
pub(super) const PANEL_TEXT_RGB: (u8, u8, u8) = (0xff, 0xff, 0xff);
pub(super) const PANEL_MUTED_RGB: (u8, u8, u8) = (0xd1, 0xd5, 0xdb);
pub(super) const BUTTON_DEFAULT_RGB: (u8, u8, u8) = (0x4b, 0x55, 0x63);
pub(super) const VEHICLE_RGB: (u8, u8, u8) = (0xff, 0xff, 0xff);
pub(super) const ROUTE_START_RGB: (u8, u8, u8) = (0x22, 0xd3, 0xee);
pub(super) const ROUTE_END_RGB: (u8, u8, u8) = (0xc0, 0x84, 0xfc);
pub(super) const FLEET_MOVING_RGB: (u8, u8, u8) = (0x38, 0xbd, 0xf8);
pub(super) const FLEET_FREE_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);
pub(super) const FLEET_IDLE_RGB: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);
pub(super) const ACCENT_AMBER_RGB: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);
pub(super) const ACCENT_RED_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);
pub(super) const ACCENT_PROGRESS_RGB: (u8, u8, u8) = (0x22, 0xd3, 0xee);

pub(super) fn style_color(no_color: bool, color: Color) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(color)
    }
}

pub(super) const fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub(super) fn panel_border_style(no_color: bool) -> Style {
    style_color(no_color, rgb(PANEL_BORDER_RGB))
}

pub(super) fn panel_title_style(no_color: bool) -> Style {
    style_color(no_color, rgb(PANEL_TEXT_RGB)).add_modifier(Modifier::BOLD)
}

pub(super) fn muted_style(no_color: bool) -> Style {
    style_color(no_color, rgb(PANEL_MUTED_RGB))
}

pub(super) fn app_background_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().bg(rgb(MAP_BG_RGB))
    }
}

/// Filled button look; `color` of `None` falls back to the neutral button.
pub(super) fn button_style(no_color: bool, color: Option<(u8, u8, u8)>) -> Style {
    if no_color {
        return Style::default().add_modifier(Modifier::REVERSED);
    }
    Style::default()
        .bg(rgb(color.unwrap_or(BUTTON_DEFAULT_RGB)))
        .fg(rgb(PANEL_TEXT_RGB))
        .add_modifier(Modifier::BOLD)
}

pub(super) fn notice_style(no_color: bool, level: NoticeLevel) -> Style {
    let color = match level {
        NoticeLevel::Info => PANEL_TEXT_RGB,
        NoticeLevel::Warning => ACCENT_AMBER_RGB,
        NoticeLevel::Error => ACCENT_RED_RGB,
    };
    style_color(no_color, rgb(color))
}
