//! Countdown tick source for Impostor.
//!
//! Emits one tick per period (one second by default) while the discussion
//! countdown runs. The scheduler has three states:
//!
//! ```text
//!            start()            pause()
//! Stopped ──────────→ Running ─────────→ Paused
//!    ↑                  │  ↑                │
//!    │      stop()      │  └────resume()────┘
//!    └──────────────────┴───────────────────┘ (stop() from any state)
//! ```
//!
//! While `Stopped` or `Paused`, [`TickScheduler::wait_for_tick`] pends
//! forever. A stopped scheduler therefore can never deliver a tick that
//! belongs to a phase that already ended.
//!
//! # Externally clocked mode
//!
//! When `period` is `None` the scheduler never runs, even after `start`.
//! Ticks then have to come from elsewhere (a UI timer, a test driving
//! `GameEvent::Tick` by hand).
//!
//! # Integration
//!
//! The scheduler sits inside the game actor's `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         _ = scheduler.wait_for_tick() => {
//!             machine.handle(GameEvent::Tick);
//!         }
//!     }
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to do when the loop wakes up later than a tick's deadline
/// (a suspended laptop, a busy runtime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickPolicy {
    /// Report how many ticks were missed and schedule the next one a full
    /// period from now. The countdown stretches by the time lost.
    #[default]
    Skip,
    /// Keep the original cadence: missed ticks fire back to back so the
    /// countdown tracks the wall clock.
    CatchUp {
        /// With more missed ticks than this, the whole backlog is skipped
        /// and the cadence restarts from now.
        max_catchup: u32,
    },
}

/// Configuration for the tick scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Time between ticks. `None` = externally clocked (never ticks).
    pub period: Option<Duration>,
    /// Overrun handling policy.
    pub policy: TickPolicy,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period: Some(Duration::from_secs(1)),
            policy: TickPolicy::default(),
        }
    }
}

impl TickConfig {
    /// Shortest period accepted; anything below is clamped up.
    pub const MIN_PERIOD: Duration = Duration::from_millis(10);

    pub fn every(period: Duration) -> Self {
        Self {
            period: Some(period),
            ..Default::default()
        }
    }

    /// A config whose scheduler never fires on its own.
    pub fn externally_clocked() -> Self {
        Self {
            period: None,
            ..Default::default()
        }
    }

    /// Clamps out-of-range values. Called by [`TickScheduler::new`].
    pub fn validated(mut self) -> Self {
        if let Some(period) = self.period {
            if period < Self::MIN_PERIOD {
                warn!(
                    period_ms = period.as_secs_f64() * 1000.0,
                    min_ms = Self::MIN_PERIOD.as_millis() as u64,
                    "tick period below minimum: clamping"
                );
                self.period = Some(Self::MIN_PERIOD);
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tick info (returned to caller each tick)
// ---------------------------------------------------------------------------

/// Information about a fired tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Ticks fired since the last `start()`, starting at 1.
    pub tick: u64,
    /// `true` if this tick fired noticeably late (>10% of a period).
    pub overrun: bool,
    /// Whole periods that passed without a tick because of lateness.
    pub ticks_skipped: u64,
}

/// Scheduler state. See the crate docs for the transition diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickerState {
    Stopped,
    Running,
    Paused,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-period tick scheduler driving one countdown.
#[derive(Debug)]
pub struct TickScheduler {
    config: TickConfig,
    tick_count: u64,
    /// When the next tick should fire. Only meaningful while running.
    next_tick: Option<Instant>,
    state: TickerState,
}

impl TickScheduler {
    /// Creates a stopped scheduler.
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        match config.period {
            Some(period) => debug!(
                period_ms = period.as_millis() as u64,
                policy = ?config.policy,
                "tick scheduler created"
            ),
            None => debug!("tick scheduler created in externally clocked mode"),
        }
        Self {
            config,
            tick_count: 0,
            next_tick: None,
            state: TickerState::Stopped,
        }
    }

    /// Starts (or restarts) ticking; the first tick is one period away.
    ///
    /// Resets the tick counter. No effect in externally clocked mode.
    pub fn start(&mut self) {
        let Some(period) = self.config.period else {
            trace!("start ignored, scheduler is externally clocked");
            return;
        };
        self.tick_count = 0;
        self.next_tick = Some(Instant::now() + period);
        self.state = TickerState::Running;
        debug!("tick scheduler started");
    }

    /// Suspends ticking without forgetting the tick count.
    ///
    /// Only a running scheduler can be paused; otherwise a no-op.
    pub fn pause(&mut self) {
        if self.state == TickerState::Running {
            self.state = TickerState::Paused;
            debug!(tick = self.tick_count, "tick scheduler paused");
        }
    }

    /// Resumes after a pause. The next tick is a full period from now, so
    /// the time spent paused never turns into a burst of ticks.
    pub fn resume(&mut self) {
        if self.state == TickerState::Paused {
            self.state = TickerState::Running;
            self.next_tick = self.config.period.map(|p| Instant::now() + p);
            debug!(tick = self.tick_count, "tick scheduler resumed");
        }
    }

    /// Stops ticking. Safe to call in any state (idempotent).
    pub fn stop(&mut self) {
        if self.state != TickerState::Stopped {
            self.state = TickerState::Stopped;
            self.next_tick = None;
            debug!(tick = self.tick_count, "tick scheduler stopped");
        }
    }

    /// Waits until the next tick is due.
    ///
    /// Pends forever unless running: inside `tokio::select!` the other
    /// branches keep being served.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let (next, period) = match (self.state, self.next_tick, self.config.period) {
            (TickerState::Running, Some(next), Some(period)) => (next, period),
            _ => return std::future::pending().await,
        };

        time::sleep_until(next).await;

        let now = Instant::now();
        self.tick_count += 1;

        let late_by = now.saturating_duration_since(next);
        let overrun = late_by > period / 10;
        let behind = (late_by.as_nanos() / period.as_nanos()) as u64;
        let mut ticks_skipped = 0u64;

        self.next_tick = Some(match self.config.policy {
            TickPolicy::Skip => {
                ticks_skipped = behind;
                if ticks_skipped > 0 {
                    warn!(
                        tick = self.tick_count,
                        skipped = ticks_skipped,
                        late_ms = late_by.as_secs_f64() * 1000.0,
                        "tick overrun: skipping ahead"
                    );
                }
                now + period
            }
            TickPolicy::CatchUp { max_catchup } => {
                if behind <= max_catchup as u64 {
                    next + period
                } else {
                    // Too far behind: drop the backlog, restart cadence.
                    ticks_skipped = behind;
                    warn!(
                        tick = self.tick_count,
                        behind,
                        "tick overrun: backlog exceeds catch-up cap of {max_catchup}"
                    );
                    now + period
                }
            }
        });

        trace!(tick = self.tick_count, overrun, "tick fired");

        TickInfo {
            tick: self.tick_count,
            overrun,
            ticks_skipped,
        }
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TickerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TickerState::Paused
    }

    /// Whether this scheduler never fires on its own.
    pub fn is_externally_clocked(&self) -> bool {
        self.config.period.is_none()
    }

    /// Ticks fired since the last `start()`.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn period(&self) -> Option<Duration> {
        self.config.period
    }
}
