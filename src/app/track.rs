use std::io::Write;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::api::FleetApi;
use crate::args::{TrackArgs, ViewerArgs};
use crate::domain::GpsSample;
use crate::error::{AppError, AppResult, ErrorKind, ValidationError};
use crate::render::{CanvasMap, RendererAdapter};
use crate::shutdown_handlers::{
    setup_keyboard_handler, setup_signal_shutdown_handler, shutdown_channel,
};
use crate::tracking::{
    ControllerCommand, PauseResolution, Phase, PhaseEvent, PlaybackController, PlaybackSettings,
    spawn_controller,
};
use crate::ui::{KeyAction, Notice, TrackingStatus, UiData, setup_render_ui};

const TRACK_HELP: &str = "space toggle  c cancel  s start  q quit";
const PAUSED_NOTICE: &str = "Tracking paused. Press space to resume or c to cancel.";
const CANCELLED_NOTICE: &str = "Tracking cancelled.";
const NO_GPS_NOTICE: &str = "No GPS data available for this vehicle.";
const FETCH_FAILED_NOTICE: &str = "Failed to fetch GPS data.";

pub(super) async fn run(
    api: Arc<dyn FleetApi>,
    args: &ViewerArgs,
    track: &TrackArgs,
) -> AppResult<()> {
    let settings = PlaybackSettings {
        tick_interval: args.tick_interval,
        completion_delay: args.completion_delay,
    };
    let vehicle_id = track
        .vehicle_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    let Some(vehicle_id) = vehicle_id else {
        let mut out = std::io::stdout();
        for line in trackable_lines(api.as_ref()).await {
            writeln!(out, "{line}")?;
        }
        return Err(AppError::validation(ValidationError::MissingVehicleId));
    };

    if args.no_ui {
        run_headless(api, settings, vehicle_id, &mut std::io::stdout()).await
    } else {
        run_interactive(api, settings, vehicle_id, args.no_color).await
    }
}

/// Ids offered for tracking; an unreachable roster only costs the hint.
pub(super) async fn trackable_lines(api: &dyn FleetApi) -> Vec<String> {
    match api.vehicle_roster().await {
        Ok(roster) => {
            let ids = roster.trackable_ids();
            if ids.is_empty() {
                return vec!["No moving vehicles to track.".to_owned()];
            }
            std::iter::once("Vehicles available to track:".to_owned())
                .chain(ids.into_iter().map(|id| format!("  {id}")))
                .collect()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load vehicle roster");
            Vec::new()
        }
    }
}

/// Plays the trace once, printing every phase change and step, and returns
/// after the ride completes or on Ctrl-C.
pub(super) async fn run_headless<W: Write>(
    api: Arc<dyn FleetApi>,
    settings: PlaybackSettings,
    vehicle_id: &str,
    out: &mut W,
) -> AppResult<()> {
    let (map_tx, _) = watch::channel(CanvasMap::default());
    let (mut controller, ticks) =
        PlaybackController::new(api, RendererAdapter::new(map_tx), settings);
    let mut events = controller.subscribe();
    controller.start(vehicle_id).await?;
    let points = controller.session().points().to_vec();
    writeln!(out, "Tracking {vehicle_id}: {} points", points.len())?;

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let mut interrupt_rx = shutdown_tx.subscribe();
    let signals = setup_signal_shutdown_handler(&shutdown_tx);
    let (handle, task) = spawn_controller(controller, ticks, shutdown_rx);

    let result = loop {
        tokio::select! {
            _ = interrupt_rx.recv() => {
                break writeln!(out, "Tracking interrupted.").map_err(AppError::from);
            }
            event = events.recv() => match event {
                Ok(event) => match write_event(out, &event, &points) {
                    Ok(true) => break Ok(()),
                    Ok(false) => {}
                    Err(err) => break Err(err),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed tracking events");
                }
                Err(broadcast::error::RecvError::Closed) => break Err(AppError::ControllerStopped),
            }
        }
    };

    drop(shutdown_tx.send(()));
    drop(handle);
    task.await?;
    signals.await?;
    result
}

/// Writes one event line; `true` once the ride has completed.
fn write_event<W: Write>(out: &mut W, event: &PhaseEvent, points: &[GpsSample]) -> AppResult<bool> {
    match event {
        PhaseEvent::Changed { from, to } => {
            writeln!(out, "Phase: {from} -> {to} [{}]", to.button().label)?;
        }
        PhaseEvent::Step { cursor, total } => {
            let sample = cursor.checked_sub(1).and_then(|index| points.get(index));
            match sample {
                Some(sample) if sample.status.is_break() => writeln!(
                    out,
                    "Step {cursor}/{total}: {}, {} (break)",
                    sample.latitude, sample.longitude
                )?,
                Some(sample) => writeln!(
                    out,
                    "Step {cursor}/{total}: {}, {}",
                    sample.latitude, sample.longitude
                )?,
                None => writeln!(out, "Step {cursor}/{total}")?,
            }
        }
        PhaseEvent::Completed { vehicle_id, steps } => {
            writeln!(out, "Ride Completed: {vehicle_id} after {steps} steps")?;
            return Ok(true);
        }
        PhaseEvent::Failed { message, .. } => {
            writeln!(out, "Error: {message}")?;
        }
    }
    Ok(false)
}

async fn run_interactive(
    api: Arc<dyn FleetApi>,
    settings: PlaybackSettings,
    vehicle_id: &str,
    no_color: bool,
) -> AppResult<()> {
    let (map_tx, mut map_rx) = watch::channel(CanvasMap::default());
    let (controller, ticks) = PlaybackController::new(api, RendererAdapter::new(map_tx), settings);
    let mut events = controller.subscribe();
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let mut quit_rx = shutdown_tx.subscribe();
    let (handle, task) = spawn_controller(controller, ticks, shutdown_rx);

    let (ui_tx, _) = watch::channel(UiData {
        title: "Live Tracking".to_owned(),
        map: map_rx.borrow_and_update().clone(),
        tracking: Some(TrackingStatus::new(vehicle_id)),
        notice: None,
        info: vec![
            format!("Tick interval: {:?}", settings.tick_interval),
            format!("Completion delay: {:?}", settings.completion_delay),
        ],
        help: TRACK_HELP,
        no_color,
    });
    let ui_handle = setup_render_ui(&shutdown_tx, &ui_tx);
    let keyboard = {
        let handle = handle.clone();
        let vehicle_id = vehicle_id.to_owned();
        setup_keyboard_handler(&shutdown_tx, move |action| {
            let command = match action {
                KeyAction::Toggle => ControllerCommand::Toggle {
                    vehicle_id: vehicle_id.clone(),
                    resolution: PauseResolution::Resume,
                },
                KeyAction::Cancel => ControllerCommand::Cancel,
                KeyAction::Start => ControllerCommand::Start(vehicle_id.clone()),
                KeyAction::Quit => return,
            };
            if let Err(err) = handle.blocking_send(command) {
                tracing::warn!(error = %err, "Dropped key command");
            }
        })
    };
    let signals = setup_signal_shutdown_handler(&shutdown_tx);

    handle
        .send(ControllerCommand::Start(vehicle_id.to_owned()))
        .await?;

    loop {
        tokio::select! {
            _ = quit_rx.recv() => break,
            changed = map_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let map = map_rx.borrow_and_update().clone();
                ui_tx.send_modify(|data| data.map = map);
            }
            event = events.recv() => match event {
                Ok(event) => ui_tx.send_modify(|data| apply_event(data, &event)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed tracking events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    drop(shutdown_tx.send(()));
    drop(handle);
    task.await?;
    ui_handle.await?;
    keyboard.await?;
    signals.await?;
    Ok(())
}

/// Folds a controller event into the status panel.
pub(super) fn apply_event(data: &mut UiData, event: &PhaseEvent) {
    let Some(status) = data.tracking.as_mut() else {
        return;
    };
    match event {
        PhaseEvent::Changed { to, .. } => {
            status.phase = *to;
            match to {
                Phase::Tracking => data.notice = None,
                Phase::Paused => data.notice = Some(Notice::warning(PAUSED_NOTICE)),
                Phase::Cancelled => {
                    status.cursor = 0;
                    status.total = 0;
                    data.notice = Some(Notice::info(CANCELLED_NOTICE));
                }
                Phase::Idle => {
                    status.cursor = 0;
                    status.total = 0;
                }
                Phase::Completed => {}
            }
        }
        PhaseEvent::Step { cursor, total } => {
            status.cursor = *cursor;
            status.total = *total;
        }
        PhaseEvent::Completed { steps, .. } => {
            data.notice = Some(Notice::info(format!("Ride completed after {steps} steps.")));
        }
        PhaseEvent::Failed { kind, message } => {
            let text = match kind {
                ErrorKind::NoData => NO_GPS_NOTICE.to_owned(),
                ErrorKind::Fetch => FETCH_FAILED_NOTICE.to_owned(),
                ErrorKind::Validation | ErrorKind::Other => message.clone(),
            };
            data.notice = Some(Notice::error(text));
        }
    }
}
