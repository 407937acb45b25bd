use ratatui::{
    layout::Rect,
    prelude::Frame,
    prelude::Backend,
    style::Color,
    symbols,
    text::Span,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Line as CanvasLine},
    },
};

use crate::domain::VehicleCategory;
use crate::render::{ALERT_RGB, CanvasMap, MarkerKind};
use crate::ui::model::UiData;

use super::theme::{
    FLEET_FREE_RGB, FLEET_IDLE_RGB, FLEET_MOVING_RGB, MAP_BG_RGB, ROUTE_END_RGB,
    ROUTE_START_RGB, VEHICLE_RGB, panel_border_style, panel_title_style, rgb, style_color,
};

const HEADING_ARROWS: [&str; 8] = ["→", "↗", "↑", "↖", "←", "↙", "↓", "↘"];
const VEHICLE_GLYPH: &str = "◆";
const BREAK_GLYPH: &str = "●";
const FLEET_GLYPH: &str = "■";

/// Smallest outer size that leaves the canvas at least one cell inside the border.
const MIN_MAP_SIDE: u16 = 3;

pub(super) fn render_map<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    if area.width < MIN_MAP_SIDE || area.height < MIN_MAP_SIDE {
        return;
    }
    let no_color = data.no_color;
    let map = &data.map;
    let viewport = map.viewport();
    let center = map.center();
    let title = format!(
        " Map {:.4}, {:.4}  z{} ",
        center.latitude,
        center.longitude,
        map.zoom()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style(no_color))
        .title(Span::styled(title, panel_title_style(no_color)));

    let canvas = Canvas::default()
        .block(block)
        .background_color(if no_color {
            Color::Reset
        } else {
            rgb(MAP_BG_RGB)
        })
        .marker(symbols::Marker::Braille)
        .x_bounds([viewport.west, viewport.east])
        .y_bounds([viewport.south, viewport.north])
        .paint(|ctx| {
            for polyline in map.polylines() {
                let color = line_color(no_color, polyline.style.color);
                for pair in polyline.points.windows(2) {
                    if let [from, to] = pair {
                        ctx.draw(&CanvasLine {
                            x1: from.longitude,
                            y1: from.latitude,
                            x2: to.longitude,
                            y2: to.latitude,
                            color,
                        });
                    }
                }
            }
            ctx.layer();
            for marker in map.markers() {
                let (glyph, color) = marker_glyph(marker.kind, marker.heading);
                ctx.print(
                    marker.position.longitude,
                    marker.position.latitude,
                    Span::styled(glyph, style_color(no_color, rgb(color))),
                );
            }
        });
    f.render_widget(canvas, area);
}

const fn line_color(no_color: bool, color: (u8, u8, u8)) -> Color {
    if no_color { Color::Reset } else { rgb(color) }
}

pub(super) fn marker_glyph(kind: MarkerKind, heading: Option<f64>) -> (&'static str, (u8, u8, u8)) {
    match kind {
        MarkerKind::Vehicle => (heading_glyph(heading), VEHICLE_RGB),
        MarkerKind::Break => (BREAK_GLYPH, ALERT_RGB),
        MarkerKind::RouteStart => ("S", ROUTE_START_RGB),
        MarkerKind::RouteEnd => ("E", ROUTE_END_RGB),
        MarkerKind::Fleet(category) => (FLEET_GLYPH, fleet_color(category)),
    }
}

const fn fleet_color(category: VehicleCategory) -> (u8, u8, u8) {
    match category {
        VehicleCategory::Moving => FLEET_MOVING_RGB,
        VehicleCategory::Free => FLEET_FREE_RGB,
        VehicleCategory::Idle => FLEET_IDLE_RGB,
    }
}

/// Arrow for the compass sector `heading` falls in (0° east, 90° north).
#[expect(
    clippy::float_arithmetic,
    reason = "Buckets the heading into eight sectors."
)]
pub(super) fn heading_glyph(heading: Option<f64>) -> &'static str {
    let Some(heading) = heading.filter(|value| value.is_finite()) else {
        return VEHICLE_GLYPH;
    };
    let sector = ((heading.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize;
    HEADING_ARROWS
        .get(sector)
        .or(HEADING_ARROWS.first())
        .copied()
        .unwrap_or(VEHICLE_GLYPH)
}

/// Labelled markers, newest last, for the side panel legend.
pub(super) fn marker_labels(map: &CanvasMap) -> Vec<(&'static str, (u8, u8, u8), &str)> {
    map.markers()
        .filter_map(|marker| {
            let (glyph, color) = marker_glyph(marker.kind, marker.heading);
            marker
                .label
                .as_deref()
                .map(|label| (glyph, color, label))
        })
        .collect()
}
