use super::model::{Notice, TrackingStatus, UiData};
use super::render::{Ui, UiActions};
use super::{KeyAction, key_action};
use crate::domain::{Position, VehicleCategory};
use crate::error::{AppError, AppResult};
use crate::render::{CanvasMap, MapView, Marker, MarkerKind, PROGRESS_LINE};
use crate::tracking::Phase;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn terminal(width: u16, height: u16) -> AppResult<Terminal<TestBackend>> {
    Terminal::new(TestBackend::new(width, height)).map_err(|err| {
        AppError::validation(format!("Failed to create TestBackend terminal: {}", err))
    })
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .iter()
        .map(|cell| cell.symbol.as_str())
        .collect()
}

fn tracking_data() -> AppResult<UiData> {
    let mut map = CanvasMap::default();
    let start = Position::new(26.4915, 80.2846);
    let next = Position::new(26.4925, 80.2856);
    map.add_polyline(&[start, next], PROGRESS_LINE)?;
    map.add_marker(Marker::new(next, MarkerKind::Vehicle))?;
    map.add_marker(
        Marker::new(start, MarkerKind::Break).with_label("Status: Break / Location: 26.4915, 80.2846"),
    )?;
    Ok(UiData {
        title: "Live Tracking".to_owned(),
        map,
        tracking: Some(TrackingStatus {
            vehicle_id: "MV-1".to_owned(),
            phase: Phase::Tracking,
            cursor: 2,
            total: 5,
        }),
        notice: None,
        info: vec!["Interval: 3s".to_owned()],
        help: "space start/pause  c cancel  s restart  q quit",
        no_color: false,
    })
}

#[test]
fn ui_render_shows_button_label_and_progress() -> AppResult<()> {
    let mut terminal = terminal(120, 30)?;
    let data = tracking_data()?;

    Ui::render(&mut terminal, &data);
    let text = screen_text(&terminal);

    if !text.contains("Tracking...") {
        return Err(AppError::validation("Expected the tracking button label"));
    }
    if !text.contains("2/5") {
        return Err(AppError::validation("Expected the step counter"));
    }
    if !text.contains("Status: Break") {
        return Err(AppError::validation("Expected the break marker label"));
    }
    if !text.contains("MV-1") {
        return Err(AppError::validation("Expected the vehicle id"));
    }
    Ok(())
}

#[test]
fn ui_render_paused_state_and_notice() -> AppResult<()> {
    let mut terminal = terminal(120, 30)?;
    let mut data = tracking_data()?;
    if let Some(status) = data.tracking.as_mut() {
        status.phase = Phase::Paused;
    }
    data.notice = Some(Notice::warning("Tracking paused."));
    data.no_color = true;

    Ui::render(&mut terminal, &data);
    let text = screen_text(&terminal);

    if !text.contains("Resume Tracking") {
        return Err(AppError::validation("Expected the resume label"));
    }
    if !text.contains("Tracking paused.") {
        return Err(AppError::validation("Expected the pause notice"));
    }
    Ok(())
}

#[test]
fn ui_render_without_tracking_or_room_does_not_panic() -> AppResult<()> {
    let mut data = UiData {
        title: "Fleet".to_owned(),
        info: vec!["Moving: 0".to_owned(), "Free: 1".to_owned()],
        ..UiData::default()
    };
    data.map.add_marker(
        Marker::new(
            Position::new(26.5, 80.3),
            MarkerKind::Fleet(VehicleCategory::Free),
        )
        .with_label("Vehicle ID: FR-1 / Status: Free"),
    )?;

    let mut wide = terminal(100, 24)?;
    Ui::render(&mut wide, &data);
    if !screen_text(&wide).contains("Free: 1") {
        return Err(AppError::validation("Expected the info lines"));
    }

    let mut tiny = terminal(10, 4)?;
    Ui::render(&mut tiny, &data);
    Ok(())
}

#[test]
fn key_bindings_map_to_actions() -> AppResult<()> {
    let cases = [
        (KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), Some(KeyAction::Toggle)),
        (KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), Some(KeyAction::Toggle)),
        (KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE), Some(KeyAction::Cancel)),
        (KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(KeyAction::Quit)),
        (KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), Some(KeyAction::Quit)),
        (KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE), Some(KeyAction::Start)),
        (KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE), Some(KeyAction::Quit)),
        (KeyEvent::new(KeyCode::Left, KeyModifiers::NONE), None),
        (KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE), None),
    ];
    for (key, expected) in cases {
        let action = key_action(&key);
        if action != expected {
            return Err(AppError::validation(format!(
                "Unexpected action {action:?} for {key:?}"
            )));
        }
    }
    Ok(())
}
