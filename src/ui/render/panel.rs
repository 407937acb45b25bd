use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ui::model::UiData;

use super::map::marker_labels;
use super::progress::progress_bar_line;
use super::theme::{
    button_style, muted_style, notice_style, panel_border_style, panel_title_style, rgb,
    style_color,
};

fn panel_block(title: &str, no_color: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style(no_color))
        .title(Span::styled(format!(" {title} "), panel_title_style(no_color)))
}

pub(super) fn render_status<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let no_color = data.no_color;
    let mut lines = Vec::with_capacity(5);

    if let Some(status) = data.tracking.as_ref() {
        lines.push(Line::from(vec![
            Span::styled("Vehicle: ", muted_style(no_color)),
            Span::raw(status.vehicle_id.clone()),
        ]));
        let button = status.phase.button();
        lines.push(Line::from(Span::styled(
            format!(" {} ", button.label),
            button_style(no_color, button.color),
        )));
        let label = if status.total > 0 {
            format!("{}/{}", status.cursor, status.total)
        } else {
            String::new()
        };
        lines.push(progress_bar_line(
            status.cursor,
            status.total,
            area.width.saturating_sub(2),
            no_color,
            &label,
        ));
    }

    if let Some(notice) = data.notice.as_ref() {
        lines.push(Line::from(Span::styled(
            notice.text.clone(),
            notice_style(no_color, notice.level),
        )));
    }

    let status = Paragraph::new(lines)
        .block(panel_block(&data.title, no_color))
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

pub(super) fn render_info<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let no_color = data.no_color;
    let labels = marker_labels(&data.map);
    let mut lines: Vec<Line<'_>> = Vec::with_capacity(data.info.len().saturating_add(labels.len()));
    lines.extend(data.info.iter().map(|line| Line::from(line.as_str())));

    // Newest markers matter most; keep what fits below the info lines.
    let room = usize::from(area.height.saturating_sub(2)).saturating_sub(lines.len());
    let skip = labels.len().saturating_sub(room);
    for (glyph, color, label) in labels.into_iter().skip(skip) {
        lines.push(Line::from(vec![
            Span::styled(glyph, style_color(no_color, rgb(color))),
            Span::raw(" "),
            Span::raw(label),
        ]));
    }

    let info = Paragraph::new(lines)
        .block(panel_block("Details", no_color))
        .wrap(Wrap { trim: false });
    f.render_widget(info, area);
}

pub(super) fn render_help<B: Backend>(f: &mut Frame<'_, B>, data: &UiData, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(data.help, muted_style(data.no_color))))
        .block(panel_block("Keys", data.no_color));
    f.render_widget(help, area);
}
