use std::io::Write;

use tokio::sync::watch;

use crate::args::ViewerArgs;
use crate::error::AppResult;
use crate::render::CanvasMap;
use crate::shutdown_handlers::{
    setup_keyboard_handler, setup_signal_shutdown_handler, shutdown_channel,
};
use crate::ui::{Notice, UiData, setup_render_ui};

const REPORT_HELP: &str = "q / Esc quit";

/// Output of a one-shot command: text lines plus the map they describe.
#[derive(Debug, Default)]
pub(crate) struct Report {
    pub(crate) title: String,
    pub(crate) lines: Vec<String>,
    pub(crate) notice: Option<Notice>,
    pub(crate) map: CanvasMap,
}

impl Report {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub(crate) fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub(crate) fn write_to<W: Write>(&self, out: &mut W) -> AppResult<()> {
        writeln!(out, "{}", self.title)?;
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        if let Some(notice) = self.notice.as_ref() {
            writeln!(out, "{}", notice.text)?;
        }
        Ok(())
    }
}

/// Prints the report in headless mode, otherwise shows it next to the map
/// until the operator quits.
pub(crate) async fn present(report: Report, args: &ViewerArgs) -> AppResult<()> {
    if args.no_ui {
        return report.write_to(&mut std::io::stdout());
    }

    let data = UiData {
        title: report.title,
        map: report.map,
        tracking: None,
        notice: report.notice,
        info: report.lines,
        help: REPORT_HELP,
        no_color: args.no_color,
    };
    let (ui_tx, _) = watch::channel(data);
    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let ui_handle = setup_render_ui(&shutdown_tx, &ui_tx);
    let keyboard = setup_keyboard_handler(&shutdown_tx, drop);
    let signals = setup_signal_shutdown_handler(&shutdown_tx);

    drop(shutdown_rx.recv().await);

    ui_handle.await?;
    keyboard.await?;
    signals.await?;
    drop(ui_tx);
    Ok(())
}
