use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Queue depth between the timer task and the controller.
const TICK_CHANNEL_CAPACITY: usize = 16;
/// Floor for the playback period; `tokio::time::interval` rejects zero.
const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// Periodic playback step.
    Advance,
    /// One-shot end of the completion display delay.
    CompletionElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
    pub kind: TickKind,
}

struct Armed {
    generation: u64,
    kind: TickKind,
    handle: JoinHandle<()>,
}

/// Timer source for the playback controller.
///
/// At most one timer is armed. Every arm and disarm moves to a new
/// generation, so ticks already queued by an older timer are recognised as
/// stale and dropped by [`TickScheduler::is_current`].
pub struct TickScheduler {
    tx: mpsc::Sender<Tick>,
    generation: u64,
    armed: Option<Armed>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);
        (
            Self {
                tx,
                generation: 0,
                armed: None,
            },
            rx,
        )
    }

    /// Arms a periodic [`TickKind::Advance`] timer. The first tick fires one
    /// full period after arming.
    pub fn arm_periodic(&mut self, period: Duration) -> u64 {
        let generation = self.advance_generation();
        let period = period.max(MIN_TICK_PERIOD);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let first = Instant::now()
                .checked_add(period)
                .unwrap_or_else(Instant::now);
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let tick = Tick {
                    generation,
                    kind: TickKind::Advance,
                };
                if tx.send(tick).await.is_err() {
                    break;
                }
            }
        });
        self.armed = Some(Armed {
            generation,
            kind: TickKind::Advance,
            handle,
        });
        generation
    }

    /// Arms a one-shot timer delivering a single tick of `kind` after `delay`.
    pub fn arm_once(&mut self, delay: Duration, kind: TickKind) -> u64 {
        let generation = self.advance_generation();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Tick { generation, kind }).await.is_err() {
                tracing::trace!(generation, "Timer fired after controller stopped");
            }
        });
        self.armed = Some(Armed {
            generation,
            kind,
            handle,
        });
        generation
    }

    /// Cancels the armed timer, if any. Queued ticks become stale.
    pub fn disarm(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.handle.abort();
            self.generation = self.generation.wrapping_add(1);
            tracing::trace!(generation = armed.generation, "Timer disarmed");
        }
    }

    /// Whether `tick` belongs to the timer that is armed right now.
    #[must_use]
    pub fn is_current(&self, tick: Tick) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|armed| armed.generation == tick.generation && armed.kind == tick.kind)
    }

    #[must_use]
    pub fn armed_generation(&self) -> Option<u64> {
        self.armed.as_ref().map(|armed| armed.generation)
    }

    #[must_use]
    pub fn armed_kind(&self) -> Option<TickKind> {
        self.armed.as_ref().map(|armed| armed.kind)
    }

    fn advance_generation(&mut self) -> u64 {
        self.disarm();
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.handle.abort();
        }
    }
}
