//! Game actor tests under paused Tokio time.

use std::sync::Arc;
use std::time::Duration;

use impostor_game::{
    GameConfig, GameError, GameEvent, GameHandle, GameMachine, GameSnapshot, Notice, Phase,
    spawn_game,
};
use impostor_model::{CategoryChoice, SessionConfig};
use impostor_setup::{MemoryHistoryStore, RosterDraft, SetupDraft, WordCatalog};
use impostor_tick::TickConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn spawn(config: GameConfig) -> GameHandle {
    let machine = GameMachine::new(
        Arc::new(WordCatalog::builtin()),
        MemoryHistoryStore::new(),
        config,
    )
    .with_rng(StdRng::seed_from_u64(5));
    spawn_game(machine)
}

fn three_minute_draft() -> SetupDraft {
    SetupDraft::new(
        RosterDraft::from_slots(vec!["Ana".into(), "Bea".into(), "Cleo".into()]),
        SessionConfig {
            category: CategoryChoice::named("Sports"),
            impostor_count: 1,
            duration_minutes: 3,
        },
    )
}

async fn start_discussion(handle: &GameHandle) {
    handle
        .dispatch(GameEvent::StartGame(three_minute_draft()))
        .await
        .unwrap();
    for _ in 0..3 {
        handle.dispatch(GameEvent::ShowRole).await.unwrap();
        handle.dispatch(GameEvent::AdvanceReveal).await.unwrap();
    }
}

async fn remaining(handle: &GameHandle) -> u32 {
    match handle.snapshot().await.unwrap() {
        GameSnapshot::Discussion(view) => view.remaining_secs,
        other => panic!("expected discussion, got {:?}", other.phase()),
    }
}

#[tokio::test(start_paused = true)]
async fn test_actor_countdown_runs_to_reveal() {
    let handle = spawn(GameConfig::default());
    let mut notices = handle.subscribe().await.unwrap();
    start_discussion(&handle).await;

    tokio::time::sleep(Duration::from_millis(10_500)).await;
    assert_eq!(remaining(&handle).await, 170);

    tokio::time::sleep(Duration::from_secs(180)).await;
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase(), Phase::Reveal);

    let mut saw_expiry = false;
    let mut ticks = 0;
    while let Ok(notice) = notices.try_recv() {
        match notice {
            Notice::CountdownTick { .. } => ticks += 1,
            Notice::CountdownExpired => saw_expiry = true,
            _ => {}
        }
    }
    assert!(saw_expiry);
    assert_eq!(ticks, 180);
}

#[tokio::test(start_paused = true)]
async fn test_actor_no_ticks_after_reveal() {
    let handle = spawn(GameConfig::default());
    start_discussion(&handle).await;
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    handle.dispatch(GameEvent::EndGame).await.unwrap();
    let mut notices = handle.subscribe().await.unwrap();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(notices.try_recv().is_err(), "ticker must be stopped");
    assert_eq!(handle.snapshot().await.unwrap().phase(), Phase::Reveal);
}

#[tokio::test(start_paused = true)]
async fn test_actor_pause_holds_value() {
    let handle = spawn(GameConfig::default());
    start_discussion(&handle).await;
    tokio::time::sleep(Duration::from_millis(5_500)).await;

    handle.dispatch(GameEvent::Pause).await.unwrap();
    let paused_at = remaining(&handle).await;
    assert_eq!(paused_at, 175);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(remaining(&handle).await, paused_at);

    handle.dispatch(GameEvent::Resume).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(remaining(&handle).await, paused_at - 1);
}

#[tokio::test(start_paused = true)]
async fn test_actor_externally_clocked_waits_for_ticks() {
    let handle = spawn(GameConfig {
        tick: TickConfig::externally_clocked(),
        ..GameConfig::default()
    });
    start_discussion(&handle).await;

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(remaining(&handle).await, 180);

    let notices = handle.dispatch(GameEvent::Tick).await.unwrap();
    assert_eq!(notices, vec![Notice::CountdownTick { remaining_secs: 179 }]);
}

#[tokio::test(start_paused = true)]
async fn test_actor_rejected_start_notifies_subscribers() {
    let handle = spawn(GameConfig::default());
    let mut notices = handle.subscribe().await.unwrap();

    let mut bad = three_minute_draft();
    bad.config.duration_minutes = 0;
    let err = handle.dispatch(GameEvent::StartGame(bad)).await.unwrap_err();
    assert!(matches!(err, GameError::Setup(_)));

    assert!(matches!(
        notices.recv().await,
        Some(Notice::SetupRejected { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_actor_shutdown_makes_handle_unavailable() {
    let handle = spawn(GameConfig::default());
    handle.shutdown().await.unwrap();

    // Let the actor task observe the command and exit.
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(handle.is_closed());
    assert!(matches!(
        handle.snapshot().await,
        Err(GameError::Unavailable)
    ));
}
