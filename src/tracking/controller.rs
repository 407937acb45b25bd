use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::api::FleetApi;
use crate::error::{AppError, AppResult, ValidationError};
use crate::render::StepRenderer;
use crate::shutdown::ShutdownReceiver;

use super::phase::{PauseResolution, Phase, PhaseEvent};
use super::route::load_route;
use super::scheduler::{Tick, TickKind, TickScheduler};
use super::session::TrackingSession;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_secs(2);
/// Phase events buffered per subscriber before it starts lagging.
const EVENT_CHANNEL_CAPACITY: usize = 64;
/// Pending UI commands before senders wait.
const COMMAND_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSettings {
    pub tick_interval: Duration,
    /// How long `Completed` is shown before reverting to `Idle`.
    pub completion_delay: Duration,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            completion_delay: DEFAULT_COMPLETION_DELAY,
        }
    }
}

/// Requests accepted by [`PlaybackController::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerCommand {
    Start(String),
    Toggle {
        vehicle_id: String,
        resolution: PauseResolution,
    },
    Pause,
    Resume,
    Cancel,
    Stop,
}

/// Owns the tracking session and drives it from start to completion.
///
/// All transitions happen on the task that owns the controller; the tick
/// scheduler is the only other source of input and its ticks are checked
/// against the armed generation before they touch the session.
pub struct PlaybackController<R> {
    api: Arc<dyn FleetApi>,
    renderer: R,
    session: TrackingSession,
    scheduler: TickScheduler,
    settings: PlaybackSettings,
    events: broadcast::Sender<PhaseEvent>,
}

impl<R> PlaybackController<R>
where
    R: StepRenderer,
{
    /// Builds an idle controller and the tick stream that feeds it.
    #[must_use]
    pub fn new(
        api: Arc<dyn FleetApi>,
        renderer: R,
        settings: PlaybackSettings,
    ) -> (Self, mpsc::Receiver<Tick>) {
        let (scheduler, ticks) = TickScheduler::new();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        (
            Self {
                api,
                renderer,
                session: TrackingSession::new(),
                scheduler,
                settings,
                events,
            },
            ticks,
        )
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PhaseEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.session.phase()
    }

    #[must_use]
    pub const fn session(&self) -> &TrackingSession {
        &self.session
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub const fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    /// Generation of the armed playback timer, `None` when no step is due.
    #[must_use]
    pub fn armed_generation(&self) -> Option<u64> {
        match self.scheduler.armed_kind() {
            Some(TickKind::Advance) => self.scheduler.armed_generation(),
            Some(TickKind::CompletionElapsed) | None => None,
        }
    }

    /// Generation of the pending completion timer while `Completed`.
    #[must_use]
    pub fn completion_generation(&self) -> Option<u64> {
        match self.scheduler.armed_kind() {
            Some(TickKind::CompletionElapsed) => self.scheduler.armed_generation(),
            Some(TickKind::Advance) | None => None,
        }
    }

    /// Starts tracking `vehicle_id`.
    ///
    /// While tracking this pauses, and while paused it resumes. Otherwise the
    /// view is cleared and the trace is loaded; playback begins one tick
    /// interval later.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty vehicle id and the loader's
    /// error when the trace cannot be fetched. The phase is unchanged in
    /// both cases.
    pub async fn start(&mut self, vehicle_id: &str) -> AppResult<()> {
        let vehicle_id = vehicle_id.trim();
        if vehicle_id.is_empty() {
            return Err(self.fail(AppError::validation(ValidationError::MissingVehicleId)));
        }
        match self.session.phase() {
            Phase::Tracking => {
                self.pause();
                Ok(())
            }
            Phase::Paused => {
                self.resume();
                Ok(())
            }
            Phase::Idle | Phase::Completed | Phase::Cancelled => self.begin(vehicle_id).await,
        }
    }

    /// Single entry point behind the tracking button.
    ///
    /// # Errors
    ///
    /// Same as [`PlaybackController::start`] when the toggle starts a session.
    pub async fn toggle(&mut self, vehicle_id: &str, resolution: PauseResolution) -> AppResult<()> {
        match (self.session.phase(), resolution) {
            (Phase::Tracking, PauseResolution::Resume | PauseResolution::Cancel) => {
                self.pause();
                Ok(())
            }
            (Phase::Paused, PauseResolution::Resume) => {
                self.resume();
                Ok(())
            }
            (Phase::Paused, PauseResolution::Cancel) => {
                self.cancel();
                Ok(())
            }
            (
                Phase::Idle | Phase::Completed | Phase::Cancelled,
                PauseResolution::Resume | PauseResolution::Cancel,
            ) => self.start(vehicle_id).await,
        }
    }

    /// `Tracking -> Paused`. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.session.phase() != Phase::Tracking {
            return false;
        }
        self.scheduler.disarm();
        self.transition(Phase::Paused);
        true
    }

    /// `Paused -> Tracking` from the saved cursor, without reloading.
    pub fn resume(&mut self) -> bool {
        if self.session.phase() != Phase::Paused {
            return false;
        }
        self.arm_playback();
        self.transition(Phase::Tracking);
        true
    }

    /// Abandons an active session: points and last point are discarded and
    /// the view is cleared. Announces `Cancelled`, then settles in `Idle`.
    pub fn cancel(&mut self) -> bool {
        if !self.session.phase().is_active() {
            return false;
        }
        self.scheduler.disarm();
        self.session.discard();
        self.renderer.reset_view();
        self.transition(Phase::Cancelled);
        self.transition(Phase::Idle);
        true
    }

    /// Returns to `Idle` from any phase. The drawn path is cleared but the
    /// last point is kept for a later restart.
    pub fn stop(&mut self) {
        self.scheduler.disarm();
        self.session.rewind();
        self.renderer.reset_view();
        self.transition(Phase::Idle);
    }

    /// Applies a scheduler tick. Returns `false` for stale ticks, which are
    /// ignored.
    pub fn handle_tick(&mut self, tick: Tick) -> bool {
        if !self.scheduler.is_current(tick) {
            tracing::debug!(generation = tick.generation, "Ignoring stale tick");
            return false;
        }
        match tick.kind {
            TickKind::Advance => self.advance(),
            TickKind::CompletionElapsed => {
                self.scheduler.disarm();
                self.session.rewind();
                self.transition(Phase::Idle);
            }
        }
        true
    }

    /// Applies one command; errors have already been broadcast as
    /// [`PhaseEvent::Failed`].
    pub async fn dispatch(&mut self, command: ControllerCommand) {
        let result = match command {
            ControllerCommand::Start(vehicle_id) => self.start(&vehicle_id).await,
            ControllerCommand::Toggle {
                vehicle_id,
                resolution,
            } => self.toggle(&vehicle_id, resolution).await,
            ControllerCommand::Pause => {
                self.pause();
                Ok(())
            }
            ControllerCommand::Resume => {
                self.resume();
                Ok(())
            }
            ControllerCommand::Cancel => {
                self.cancel();
                Ok(())
            }
            ControllerCommand::Stop => {
                self.stop();
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::debug!(error = %err, "Controller command rejected");
        }
    }

    /// Drives the controller until shutdown or until every command sender is
    /// gone, then hands the renderer back.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<ControllerCommand>,
        mut ticks: mpsc::Receiver<Tick>,
        mut shutdown_rx: ShutdownReceiver,
    ) -> R {
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                command = commands.recv() => match command {
                    Some(command) => self.dispatch(command).await,
                    None => break,
                },
                Some(tick) = ticks.recv() => {
                    self.handle_tick(tick);
                }
            }
        }
        self.scheduler.disarm();
        self.renderer
    }

    /// Loads and starts a fresh session. The phase and any pending completion
    /// timer are left alone until the trace has loaded.
    async fn begin(&mut self, vehicle_id: &str) -> AppResult<()> {
        self.session.rewind();
        self.renderer.reset_view();

        tracing::info!(vehicle_id, "Loading GPS trace");
        let points = match load_route(self.api.as_ref(), vehicle_id).await {
            Ok(points) => points,
            Err(err) => return Err(self.fail(err)),
        };
        self.scheduler.disarm();
        self.transition(Phase::Idle);
        self.session.load(vehicle_id, points);
        self.arm_playback();
        self.transition(Phase::Tracking);
        Ok(())
    }

    fn advance(&mut self) {
        if self.session.phase() != Phase::Tracking {
            return;
        }
        if let Some(step) = self.session.step() {
            self.renderer
                .render_step(&step.current, step.next.as_ref(), step.is_first);
            tracing::debug!(
                cursor = self.session.cursor(),
                total = self.session.len(),
                "Rendered step"
            );
            self.emit(PhaseEvent::Step {
                cursor: self.session.cursor(),
                total: self.session.len(),
            });
        }
        if self.session.is_exhausted() {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.scheduler.disarm();
        self.transition(Phase::Completed);
        self.emit(PhaseEvent::Completed {
            vehicle_id: self.session.vehicle_id().unwrap_or_default().to_owned(),
            steps: self.session.cursor(),
        });
        let generation = self
            .scheduler
            .arm_once(self.settings.completion_delay, TickKind::CompletionElapsed);
        tracing::debug!(generation, "Completion delay armed");
    }

    fn arm_playback(&mut self) {
        let generation = self.scheduler.arm_periodic(self.settings.tick_interval);
        tracing::debug!(generation, cursor = self.session.cursor(), "Playback armed");
    }

    fn transition(&mut self, to: Phase) {
        let from = self.session.phase();
        if from == to {
            return;
        }
        self.session.set_phase(to);
        tracing::info!(
            vehicle_id = self.session.vehicle_id().unwrap_or_default(),
            from = %from,
            to = %to,
            "Phase changed"
        );
        self.emit(PhaseEvent::Changed { from, to });
    }

    fn fail(&self, err: AppError) -> AppError {
        tracing::warn!(kind = ?err.kind(), error = %err, "Tracking request failed");
        self.emit(PhaseEvent::Failed {
            kind: err.kind(),
            message: err.to_string(),
        });
        err
    }

    fn emit(&self, event: PhaseEvent) {
        drop(self.events.send(event));
    }
}

/// Cloneable front end for a controller running on its own task.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: mpsc::Sender<ControllerCommand>,
}

impl ControllerHandle {
    /// Queues `command` for the controller task.
    ///
    /// # Errors
    ///
    /// Returns an error when the controller task has stopped.
    pub async fn send(&self, command: ControllerCommand) -> AppResult<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_closed| AppError::ControllerStopped)
    }

    /// Like [`Self::send`], for threads outside the runtime such as the
    /// keyboard poller.
    ///
    /// # Errors
    ///
    /// Returns an error when the controller task has stopped.
    pub fn blocking_send(&self, command: ControllerCommand) -> AppResult<()> {
        self.tx
            .blocking_send(command)
            .map_err(|_closed| AppError::ControllerStopped)
    }
}

/// Spawns `controller` on its own task and returns a handle for commands.
#[must_use]
pub fn spawn_controller<R>(
    controller: PlaybackController<R>,
    ticks: mpsc::Receiver<Tick>,
    shutdown_rx: ShutdownReceiver,
) -> (ControllerHandle, tokio::task::JoinHandle<R>)
where
    R: StepRenderer + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let handle = tokio::spawn(controller.run(rx, ticks, shutdown_rx));
    (ControllerHandle { tx }, handle)
}
