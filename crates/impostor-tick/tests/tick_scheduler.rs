//! Integration tests for the countdown tick scheduler.
//!
//! Uses paused Tokio time so `sleep_until` resolves as soon as the
//! runtime is idle and nothing depends on the wall clock.

use std::time::Duration;

use impostor_tick::{TickConfig, TickPolicy, TickScheduler, TickerState};
use tokio::time::Instant;

// =========================================================================
// Helpers
// =========================================================================

fn one_second() -> TickScheduler {
    TickScheduler::new(TickConfig::default())
}

async fn assert_pends(s: &mut TickScheduler) {
    let result = tokio::time::timeout(Duration::from_secs(30), s.wait_for_tick()).await;
    assert!(result.is_err(), "scheduler in state {:?} should pend", s.state());
}

// =========================================================================
// TickConfig
// =========================================================================

#[test]
fn test_default_config_ticks_every_second() {
    let cfg = TickConfig::default();
    assert_eq!(cfg.period, Some(Duration::from_secs(1)));
    assert_eq!(cfg.policy, TickPolicy::Skip);
}

#[test]
fn test_validated_clamps_tiny_period() {
    let cfg = TickConfig::every(Duration::from_micros(5)).validated();
    assert_eq!(cfg.period, Some(TickConfig::MIN_PERIOD));
}

#[test]
fn test_externally_clocked_has_no_period() {
    let s = TickScheduler::new(TickConfig::externally_clocked());
    assert!(s.is_externally_clocked());
    assert_eq!(s.period(), None);
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn test_new_scheduler_is_stopped() {
    let s = one_second();
    assert_eq!(s.state(), TickerState::Stopped);
    assert_eq!(s.tick_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stopped_scheduler_never_fires() {
    let mut s = one_second();
    assert_pends(&mut s).await;
}

#[tokio::test(start_paused = true)]
async fn test_start_fires_once_per_period() {
    let mut s = one_second();
    s.start();
    let started = Instant::now();

    for expected in 1..=5 {
        let info = s.wait_for_tick().await;
        assert_eq!(info.tick, expected);
        assert!(!info.overrun);
        assert_eq!(info.ticks_skipped, 0);
    }

    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_start_in_externally_clocked_mode_stays_stopped() {
    let mut s = TickScheduler::new(TickConfig::externally_clocked());
    s.start();
    assert_eq!(s.state(), TickerState::Stopped);
    assert_pends(&mut s).await;
}

#[tokio::test(start_paused = true)]
async fn test_restart_resets_tick_count() {
    let mut s = one_second();
    s.start();
    s.wait_for_tick().await;
    s.wait_for_tick().await;
    assert_eq!(s.tick_count(), 2);

    s.stop();
    s.start();
    assert_eq!(s.tick_count(), 0);
    assert_eq!(s.wait_for_tick().await.tick, 1);
}

// =========================================================================
// Pause / Resume / Stop
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_pause_prevents_ticks() {
    let mut s = one_second();
    s.start();
    s.wait_for_tick().await;

    s.pause();
    assert!(s.is_paused());
    assert_pends(&mut s).await;
    assert_eq!(s.tick_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_resume_schedules_full_period_from_now() {
    let mut s = one_second();
    s.start();
    s.wait_for_tick().await;
    s.pause();

    tokio::time::advance(Duration::from_secs(10)).await;
    s.resume();
    let resumed = Instant::now();

    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 2);
    assert_eq!(info.ticks_skipped, 0, "time spent paused is not a backlog");
    assert_eq!(resumed.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_pause_when_stopped_is_noop() {
    let mut s = one_second();
    s.pause();
    assert_eq!(s.state(), TickerState::Stopped);
    s.resume();
    assert_eq!(s.state(), TickerState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_stop_from_paused_then_resume_stays_stopped() {
    let mut s = one_second();
    s.start();
    s.pause();
    s.stop();
    s.resume();
    assert_eq!(s.state(), TickerState::Stopped);
    assert_pends(&mut s).await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent() {
    let mut s = one_second();
    s.start();
    s.stop();
    s.stop();
    assert_eq!(s.state(), TickerState::Stopped);
}

// =========================================================================
// Overrun policies
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_skip_policy_reports_missed_ticks() {
    let mut s = one_second();
    s.start();

    tokio::time::advance(Duration::from_millis(3_500)).await;

    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 1);
    assert!(info.overrun);
    assert_eq!(info.ticks_skipped, 2);

    // Next tick is a full period after the late one.
    let before = Instant::now();
    s.wait_for_tick().await;
    assert_eq!(before.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_catch_up_policy_fires_backlog_immediately() {
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::CatchUp { max_catchup: 5 },
        ..TickConfig::default()
    });
    s.start();

    tokio::time::advance(Duration::from_millis(3_500)).await;
    let before = Instant::now();

    for expected in 1..=3 {
        let info = s.wait_for_tick().await;
        assert_eq!(info.tick, expected);
        assert_eq!(info.ticks_skipped, 0);
    }
    assert_eq!(before.elapsed(), Duration::ZERO, "backlog fires back to back");

    // The fourth deadline is at t=4s, half a second away.
    s.wait_for_tick().await;
    assert_eq!(before.elapsed(), Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn test_catch_up_policy_over_cap_skips_backlog() {
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::CatchUp { max_catchup: 1 },
        ..TickConfig::default()
    });
    s.start();

    tokio::time::advance(Duration::from_millis(4_200)).await;

    let info = s.wait_for_tick().await;
    assert_eq!(info.ticks_skipped, 3);
    let before = Instant::now();
    s.wait_for_tick().await;
    assert_eq!(before.elapsed(), Duration::from_secs(1));
}

// =========================================================================
// select! loop pattern (mirrors the game actor)
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_select_loop_pattern() {
    let mut s = one_second();
    s.start();

    let (tx, mut rx) = tokio::sync::mpsc::channel::<&str>(10);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        tx.send("stop").await.ok();
    });

    let mut ticks_fired = 0u64;
    loop {
        tokio::select! {
            Some(cmd) = rx.recv() => {
                assert_eq!(cmd, "stop");
                s.stop();
                break;
            }
            info = s.wait_for_tick() => {
                ticks_fired += 1;
                assert_eq!(info.tick, ticks_fired);
            }
        }
    }

    assert_eq!(ticks_fired, 3);
    assert_pends(&mut s).await;
}
