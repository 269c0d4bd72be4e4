//! Game actor: a Tokio task that owns one [`GameMachine`] and its tick
//! source.
//!
//! Everything that touches the machine goes through the actor's channel,
//! so events are applied one at a time and each transition completes
//! before the next event or tick is looked at.

use impostor_setup::NameHistoryStore;
use impostor_tick::{TickScheduler, TickerState};
use tokio::sync::{mpsc, oneshot};

use crate::{GameError, GameEvent, GameMachine, GameSnapshot, Notice};

/// Channel a subscriber receives notices on.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

type NoticeSender = mpsc::UnboundedSender<Notice>;

/// Commands sent to the game actor. Variants with a `reply` are
/// request/response; the caller waits on the oneshot.
enum GameCommand {
    Dispatch {
        event: GameEvent,
        reply: oneshot::Sender<Result<Vec<Notice>, GameError>>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
    Subscribe {
        sender: NoticeSender,
    },
    Shutdown,
}

/// Handle to a running game. Cheap to clone.
#[derive(Clone)]
pub struct GameHandle {
    sender: mpsc::Sender<GameCommand>,
}

impl GameHandle {
    /// Applies an event and returns the notices it produced.
    ///
    /// The same notices also go to every subscriber.
    pub async fn dispatch(&self, event: GameEvent) -> Result<Vec<Notice>, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(GameCommand::Dispatch {
                event,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GameError::Unavailable)?;
        reply_rx.await.map_err(|_| GameError::Unavailable)?
    }

    /// What the current phase allows a screen to show.
    pub async fn snapshot(&self) -> Result<GameSnapshot, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(GameCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| GameError::Unavailable)?;
        reply_rx.await.map_err(|_| GameError::Unavailable)
    }

    /// Registers a new notice subscriber. Notices produced by ticks only
    /// reach the outside this way.
    pub async fn subscribe(&self) -> Result<NoticeReceiver, GameError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.sender
            .send(GameCommand::Subscribe { sender: tx })
            .await
            .map_err(|_| GameError::Unavailable)?;
        Ok(rx)
    }

    /// Stops the actor. Later calls on any clone return
    /// [`GameError::Unavailable`].
    pub async fn shutdown(&self) -> Result<(), GameError> {
        self.sender
            .send(GameCommand::Shutdown)
            .await
            .map_err(|_| GameError::Unavailable)
    }

    /// Returns `true` once the actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct GameActor<S: NameHistoryStore> {
    machine: GameMachine<S>,
    ticker: TickScheduler,
    subscribers: Vec<NoticeSender>,
    receiver: mpsc::Receiver<GameCommand>,
}

impl<S: NameHistoryStore> GameActor<S> {
    async fn run(mut self) {
        tracing::info!(phase = %self.machine.phase(), "game actor started");

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => {
                    let Some(cmd) = cmd else { break };
                    match cmd {
                        GameCommand::Dispatch { event, reply } => {
                            let result = self.apply(event);
                            let _ = reply.send(result);
                        }
                        GameCommand::Snapshot { reply } => {
                            let _ = reply.send(self.machine.snapshot());
                        }
                        GameCommand::Subscribe { sender } => {
                            self.subscribers.push(sender);
                            tracing::debug!(
                                subscribers = self.subscribers.len(),
                                "notice subscriber added"
                            );
                        }
                        GameCommand::Shutdown => {
                            tracing::info!("game shutting down");
                            break;
                        }
                    }
                }
                info = self.ticker.wait_for_tick() => {
                    if info.ticks_skipped > 0 {
                        tracing::debug!(skipped = info.ticks_skipped, "countdown fell behind");
                    }
                    if let Err(e) = self.apply(GameEvent::Tick) {
                        tracing::warn!(error = %e, "tick rejected");
                    }
                }
            }
        }

        self.ticker.stop();
        tracing::info!("game actor stopped");
    }

    /// Runs one event through the machine, fans out the notices, and
    /// brings the ticker in line with the new phase.
    fn apply(&mut self, event: GameEvent) -> Result<Vec<Notice>, GameError> {
        let result = self.machine.handle(event);
        match &result {
            Ok(notices) => self.broadcast(notices),
            Err(GameError::Setup(e)) => self.broadcast(&[Notice::SetupRejected {
                reason: e.to_string(),
            }]),
            Err(_) => {}
        }
        self.sync_ticker();
        result
    }

    /// Running while the countdown runs, paused while it is paused,
    /// stopped in every other phase.
    fn sync_ticker(&mut self) {
        match self.machine.countdown() {
            Some(countdown) if countdown.is_paused() => self.ticker.pause(),
            Some(_) => match self.ticker.state() {
                TickerState::Stopped => self.ticker.start(),
                TickerState::Paused => self.ticker.resume(),
                TickerState::Running => {}
            },
            None => self.ticker.stop(),
        }
    }

    /// Sends to every subscriber, dropping the ones that went away.
    fn broadcast(&mut self, notices: &[Notice]) {
        if notices.is_empty() {
            return;
        }
        self.subscribers.retain(|subscriber| {
            notices
                .iter()
                .all(|notice| subscriber.send(notice.clone()).is_ok())
        });
    }
}

/// Spawns the game actor and returns a handle to it.
///
/// Must be called from within a Tokio runtime. The command channel is
/// bounded by [`GameConfig::channel_size`](crate::GameConfig::channel_size).
pub fn spawn_game<S: NameHistoryStore>(machine: GameMachine<S>) -> GameHandle {
    let (sender, receiver) = mpsc::channel(machine.config().channel_size);
    let ticker = TickScheduler::new(machine.config().tick.clone());

    let mut actor = GameActor {
        machine,
        ticker,
        subscribers: Vec::new(),
        receiver,
    };
    actor.sync_ticker();
    tokio::spawn(actor.run());

    GameHandle { sender }
}
