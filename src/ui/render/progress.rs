use ratatui::prelude::text;
use ratatui::text::Span;

use super::theme::{ACCENT_PROGRESS_RGB, PANEL_TEXT_RGB, rgb, style_color};

/// `[████▌   3/8   ]` style bar with the label centered over the fill.
pub(super) fn progress_bar_line(
    done: usize,
    total: usize,
    width: u16,
    no_color: bool,
    label: &str,
) -> text::Line<'static> {
    let bar_width = usize::from(width.saturating_sub(3)).max(1);
    let total_eighths = bar_width.saturating_mul(8);
    let filled_eighths = if total > 0 {
        done.min(total)
            .saturating_mul(total_eighths)
            .checked_div(total)
            .unwrap_or(0)
    } else {
        0
    };
    let full_count = (filled_eighths / 8).min(bar_width);
    let rem = filled_eighths.checked_rem(8).unwrap_or(0);
    let partial = ["", "▏", "▎", "▍", "▌", "▋", "▊", "▉"];
    let partial_char = partial
        .get(rem)
        .and_then(|block| block.chars().next())
        .unwrap_or(' ');
    let has_partial = rem > 0 && full_count < bar_width;

    let label_chars: Vec<char> = label.chars().take(bar_width).collect();
    let label_start = bar_width.saturating_sub(label_chars.len()) / 2;

    let fill_style = style_color(no_color, rgb(ACCENT_PROGRESS_RGB));
    let label_style = style_color(no_color, rgb(PANEL_TEXT_RGB));
    let mut spans = Vec::with_capacity(bar_width.saturating_add(2));
    spans.push(Span::raw("["));
    for idx in 0..bar_width {
        if let Some(ch) = idx
            .checked_sub(label_start)
            .and_then(|offset| label_chars.get(offset))
        {
            spans.push(Span::styled(ch.to_string(), label_style));
        } else if idx < full_count {
            spans.push(Span::styled("█", fill_style));
        } else if has_partial && idx == full_count {
            spans.push(Span::styled(partial_char.to_string(), fill_style));
        } else {
            spans.push(Span::raw(" "));
        }
    }
    spans.push(Span::raw("]"));
    text::Line::from(spans)
}
