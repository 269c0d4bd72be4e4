//! The session state machine.
//!
//! [`GameMachine`] is plain synchronous code: one event in, a list of
//! notices out. It never sleeps and never spawns. Time enters only as
//! `GameEvent::Tick`, which the actor (or a test) feeds in.

use std::sync::Arc;

use impostor_model::Session;
use impostor_setup::{
    Configurator, DraftEdit, NameHistory, NameHistoryStore, RosterDraft, SetupDraft, WordCatalog,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::{
    Countdown, DiscussionView, GameConfig, GameError, GameEvent, GameSnapshot, Notice, Phase,
    RevealSummary, RoleCard,
};

/// Phase-specific data. The session lives inside the phases that have
/// one, so it cannot outlive `Reveal` or exist during `Configuring`.
#[derive(Debug)]
enum Stage {
    Configuring {
        draft: SetupDraft,
        last_error: Option<String>,
    },
    RoleReveal {
        session: Session,
        /// Players who have already seen their card.
        progress: usize,
        /// Whether `players[progress]`'s card is face up.
        shown: bool,
    },
    Discussion {
        session: Session,
        countdown: Countdown,
    },
    Reveal {
        session: Session,
    },
}

impl Stage {
    fn phase(&self) -> Phase {
        match self {
            Self::Configuring { .. } => Phase::Configuring,
            Self::RoleReveal { .. } => Phase::RoleReveal,
            Self::Discussion { .. } => Phase::Discussion,
            Self::Reveal { .. } => Phase::Reveal,
        }
    }

    fn session(&self) -> Option<&Session> {
        match self {
            Self::Configuring { .. } => None,
            Self::RoleReveal { session, .. }
            | Self::Discussion { session, .. }
            | Self::Reveal { session } => Some(session),
        }
    }
}

/// One table's game, from lobby to reveal and back.
pub struct GameMachine<S: NameHistoryStore> {
    configurator: Configurator,
    history: NameHistory<S>,
    config: GameConfig,
    rng: Box<dyn RngCore + Send>,
    stage: Stage,
}

impl<S: NameHistoryStore> GameMachine<S> {
    /// Creates a machine in `Configuring`, with the lobby pre-filled from
    /// whatever `store` remembers.
    pub fn new(catalog: Arc<WordCatalog>, store: S, config: GameConfig) -> Self {
        let config = config.validated();
        let history = NameHistory::load(store);
        let draft = SetupDraft::new(
            RosterDraft::from_history(history.names()),
            config.default_session.clone(),
        );
        Self {
            configurator: Configurator::new(catalog),
            history,
            config,
            rng: Box::new(StdRng::from_rng(&mut rand::rng())),
            stage: Stage::Configuring {
                draft,
                last_error: None,
            },
        }
    }

    /// Replaces the source of randomness used when dealing roles.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Applies one event.
    ///
    /// # Errors
    /// - [`GameError::InvalidEvent`] if the event means nothing in the
    ///   current phase, or `AdvanceReveal` arrives while the card is still
    ///   face down. Nothing changes.
    /// - [`GameError::Setup`] if `StartGame` was refused. The machine stays
    ///   in `Configuring` holding the submitted draft.
    pub fn handle(&mut self, event: GameEvent) -> Result<Vec<Notice>, GameError> {
        let phase = self.phase();
        match (phase, event) {
            (Phase::Configuring, GameEvent::EditDraft(edit)) => Ok(self.edit_draft(edit)),
            (Phase::Configuring, GameEvent::StartGame(draft)) => self.start_game(draft),
            (Phase::RoleReveal, GameEvent::ShowRole) => Ok(self.show_role()),
            (Phase::RoleReveal, GameEvent::AdvanceReveal) if self.card_shown() => {
                Ok(self.advance_reveal())
            }
            (Phase::Discussion, GameEvent::Tick) => Ok(self.tick()),
            (Phase::Discussion, GameEvent::Pause) => Ok(self.set_paused(true)),
            (Phase::Discussion, GameEvent::Resume) => Ok(self.set_paused(false)),
            (Phase::Discussion, GameEvent::EndGame) => {
                info!("discussion ended early");
                Ok(self.enter_reveal())
            }
            (Phase::Reveal, GameEvent::PlayAgain) => Ok(self.play_again()),
            (phase, event) => {
                debug!(%phase, event = event.name(), "event rejected");
                Err(GameError::InvalidEvent {
                    phase,
                    event: event.name(),
                })
            }
        }
    }

    fn edit_draft(&mut self, edit: DraftEdit) -> Vec<Notice> {
        let Stage::Configuring { draft, .. } = &mut self.stage else {
            return Vec::new();
        };
        if draft.apply(edit) {
            vec![Notice::DraftUpdated]
        } else {
            debug!("draft edit refused");
            Vec::new()
        }
    }

    fn start_game(&mut self, submitted: SetupDraft) -> Result<Vec<Notice>, GameError> {
        let Stage::Configuring { draft, last_error } = &mut self.stage else {
            return Err(GameError::InvalidEvent {
                phase: self.stage.phase(),
                event: "StartGame",
            });
        };
        *draft = submitted;

        let result = self.configurator.finalize_with_rng(
            draft.roster.slots(),
            &draft.config,
            &mut self.history,
            &mut *self.rng,
        );
        match result {
            Ok(session) => {
                info!(players = session.len(), "roles dealt");
                self.stage = Stage::RoleReveal {
                    session,
                    progress: 0,
                    shown: false,
                };
                Ok(vec![phase_changed(Phase::Configuring, Phase::RoleReveal)])
            }
            Err(e) => {
                debug!(error = %e, "start refused");
                *last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    fn show_role(&mut self) -> Vec<Notice> {
        let Stage::RoleReveal {
            progress, shown, ..
        } = &mut self.stage
        else {
            return Vec::new();
        };
        if *shown {
            return Vec::new();
        }
        *shown = true;
        vec![Notice::RoleShown { index: *progress }]
    }

    /// Only a card that was turned face up can be hidden and passed on.
    fn card_shown(&self) -> bool {
        matches!(self.stage, Stage::RoleReveal { shown: true, .. })
    }

    fn advance_reveal(&mut self) -> Vec<Notice> {
        let Stage::RoleReveal {
            session,
            progress,
            shown,
        } = &mut self.stage
        else {
            return Vec::new();
        };

        let mut notices = vec![Notice::RoleHidden { index: *progress }];
        *shown = false;
        *progress += 1;
        debug!(progress = *progress, total = session.len(), "device passed on");

        if *progress >= session.len() {
            let total_secs = session.duration_secs();
            if let Some(session) = self.take_session() {
                info!(total_secs, "discussion started");
                self.stage = Stage::Discussion {
                    session,
                    countdown: Countdown::new(total_secs),
                };
                notices.push(phase_changed(Phase::RoleReveal, Phase::Discussion));
            }
        }
        notices
    }

    fn tick(&mut self) -> Vec<Notice> {
        let Stage::Discussion { countdown, .. } = &mut self.stage else {
            return Vec::new();
        };
        if !countdown.tick() {
            return Vec::new();
        }

        let mut notices = vec![Notice::CountdownTick {
            remaining_secs: countdown.remaining_secs(),
        }];
        if countdown.is_expired() {
            info!("countdown expired");
            notices.push(Notice::CountdownExpired);
            notices.extend(self.enter_reveal());
        }
        notices
    }

    fn set_paused(&mut self, paused: bool) -> Vec<Notice> {
        let Stage::Discussion { countdown, .. } = &mut self.stage else {
            return Vec::new();
        };
        let changed = if paused {
            countdown.pause()
        } else {
            countdown.resume()
        };
        if !changed {
            return Vec::new();
        }

        let remaining_secs = countdown.remaining_secs();
        if paused {
            debug!(remaining_secs, "countdown paused");
            vec![Notice::CountdownPaused { remaining_secs }]
        } else {
            debug!(remaining_secs, "countdown resumed");
            vec![Notice::CountdownResumed { remaining_secs }]
        }
    }

    fn enter_reveal(&mut self) -> Vec<Notice> {
        let from = self.phase();
        let Some(session) = self.take_session() else {
            return Vec::new();
        };
        info!(impostors = session.impostor_count(), "roles revealed");
        self.stage = Stage::Reveal { session };
        vec![phase_changed(from, Phase::Reveal)]
    }

    fn play_again(&mut self) -> Vec<Notice> {
        let draft = SetupDraft::new(
            RosterDraft::from_history(self.history.names()),
            self.config.default_session.clone(),
        );
        self.stage = Stage::Configuring {
            draft,
            last_error: None,
        };
        info!("back to the lobby");
        vec![phase_changed(Phase::Reveal, Phase::Configuring)]
    }

    /// Moves the session out, leaving a throwaway lobby behind. The caller
    /// always installs the next stage right after.
    fn take_session(&mut self) -> Option<Session> {
        let placeholder = Stage::Configuring {
            draft: SetupDraft::default(),
            last_error: None,
        };
        match std::mem::replace(&mut self.stage, placeholder) {
            Stage::RoleReveal { session, .. }
            | Stage::Discussion { session, .. }
            | Stage::Reveal { session } => Some(session),
            configuring @ Stage::Configuring { .. } => {
                self.stage = configuring;
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.stage.phase()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &WordCatalog {
        self.configurator.catalog()
    }

    pub fn history(&self) -> &NameHistory<S> {
        &self.history
    }

    /// The lobby form, while configuring.
    pub fn draft(&self) -> Option<&SetupDraft> {
        match &self.stage {
            Stage::Configuring { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Why the last `StartGame` was refused, while still configuring.
    pub fn last_error(&self) -> Option<&str> {
        match &self.stage {
            Stage::Configuring { last_error, .. } => last_error.as_deref(),
            _ => None,
        }
    }

    /// `(players who have seen their card, total players)` during
    /// `RoleReveal`.
    pub fn reveal_progress(&self) -> Option<(usize, usize)> {
        match &self.stage {
            Stage::RoleReveal {
                session, progress, ..
            } => Some((*progress, session.len())),
            _ => None,
        }
    }

    /// The card currently face up, if any. At most one card is ever
    /// exposed at a time.
    pub fn role_card(&self) -> Option<RoleCard> {
        match &self.stage {
            Stage::RoleReveal {
                session,
                progress,
                shown: true,
            } => session.player(*progress).map(|player| {
                RoleCard::for_player(player, session.category(), session.secret_word())
            }),
            _ => None,
        }
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        match &self.stage {
            Stage::Discussion { countdown, .. } => Some(countdown),
            _ => None,
        }
    }

    pub fn discussion(&self) -> Option<DiscussionView> {
        match &self.stage {
            Stage::Discussion { session, countdown } => {
                Some(discussion_view(session, countdown, self.config.low_time_secs))
            }
            _ => None,
        }
    }

    pub fn reveal(&self) -> Option<RevealSummary> {
        match &self.stage {
            Stage::Reveal { session } => Some(reveal_summary(session)),
            _ => None,
        }
    }

    /// The session, outside `Configuring`. Holds every role: only hand it
    /// to code that will not put it on screen before `Reveal`.
    pub fn session(&self) -> Option<&Session> {
        self.stage.session()
    }

    /// What the current phase allows a screen to show.
    pub fn snapshot(&self) -> GameSnapshot {
        match &self.stage {
            Stage::Configuring { draft, last_error } => GameSnapshot::Configuring {
                draft: draft.clone(),
                categories: self.catalog().names().map(str::to_string).collect(),
                last_error: last_error.clone(),
            },
            Stage::RoleReveal {
                session, progress, ..
            } => GameSnapshot::RoleReveal {
                progress: *progress,
                total: session.len(),
                current_name: session
                    .player(*progress)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                card: self.role_card(),
            },
            Stage::Discussion { session, countdown } => GameSnapshot::Discussion(
                discussion_view(session, countdown, self.config.low_time_secs),
            ),
            Stage::Reveal { session } => GameSnapshot::Reveal(reveal_summary(session)),
        }
    }
}

fn discussion_view(session: &Session, countdown: &Countdown, low_time_secs: u32) -> DiscussionView {
    DiscussionView {
        category: session.category().to_string(),
        players: session.player_names(),
        remaining_secs: countdown.remaining_secs(),
        total_secs: countdown.total_secs(),
        clock: countdown.clock(),
        fraction_left: countdown.fraction_left(),
        low_time: countdown.remaining_secs() <= low_time_secs,
        paused: countdown.is_paused(),
    }
}

fn reveal_summary(session: &Session) -> RevealSummary {
    RevealSummary {
        category: session.category().to_string(),
        secret_word: session.secret_word().to_string(),
        impostors: session.impostors().cloned().collect(),
        citizens: session.citizens().cloned().collect(),
    }
}

fn phase_changed(from: Phase, to: Phase) -> Notice {
    debug_assert!(from.can_transition_to(to), "{from} -> {to}");
    info!(%from, %to, "phase changed");
    Notice::PhaseChanged { from, to }
}
