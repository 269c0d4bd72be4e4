//! What goes into the machine, what comes out, and what a screen may show.

use impostor_model::{Player, PlayerId, Role};
use impostor_setup::{DraftEdit, SetupDraft};
use serde::{Deserialize, Serialize};

use crate::Phase;

// ---------------------------------------------------------------------------
// GameEvent
// ---------------------------------------------------------------------------

/// An input to [`GameMachine::handle`](crate::GameMachine::handle).
///
/// Each event is valid in exactly one phase:
///
/// | Phase         | Events                                      |
/// |---------------|---------------------------------------------|
/// | `Configuring` | `EditDraft`, `StartGame`                    |
/// | `RoleReveal`  | `ShowRole`, `AdvanceReveal`                 |
/// | `Discussion`  | `Tick`, `Pause`, `Resume`, `EndGame`        |
/// | `Reveal`      | `PlayAgain`                                 |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// One edit to the lobby form.
    EditDraft(DraftEdit),
    /// Submit the lobby form and deal the roles.
    StartGame(SetupDraft),
    /// Flip the current player's card face up.
    ShowRole,
    /// Hide the card and pass the device on.
    AdvanceReveal,
    /// One second of discussion has passed.
    Tick,
    Pause,
    Resume,
    /// Stop the discussion early and go to the reveal.
    EndGame,
    /// Back to the lobby with the last roster filled in.
    PlayAgain,
}

impl GameEvent {
    /// Short name for logs and errors. Never includes payload data.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EditDraft(_) => "EditDraft",
            Self::StartGame(_) => "StartGame",
            Self::ShowRole => "ShowRole",
            Self::AdvanceReveal => "AdvanceReveal",
            Self::Tick => "Tick",
            Self::Pause => "Pause",
            Self::Resume => "Resume",
            Self::EndGame => "EndGame",
            Self::PlayAgain => "PlayAgain",
        }
    }
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Something a presentation surface should react to.
///
/// Notices never carry a role or the secret word. A surface that needs them
/// asks for a [`GameSnapshot`], which only contains what the current phase
/// may show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    PhaseChanged { from: Phase, to: Phase },
    DraftUpdated,
    /// `StartGame` was refused. The draft is kept as submitted.
    SetupRejected { reason: String },
    RoleShown { index: usize },
    RoleHidden { index: usize },
    CountdownTick { remaining_secs: u32 },
    CountdownPaused { remaining_secs: u32 },
    CountdownResumed { remaining_secs: u32 },
    /// The countdown hit zero. Followed by the change to `Reveal`.
    CountdownExpired,
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// The face-up card of one player during `RoleReveal`.
///
/// A citizen's card carries the word and the category. An impostor's card
/// carries neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCard {
    pub player: PlayerId,
    pub name: String,
    pub role: Role,
    pub secret_word: Option<String>,
    pub category: Option<String>,
}

impl RoleCard {
    pub(crate) fn for_player(player: &Player, category: &str, secret_word: &str) -> Self {
        let (secret_word, category) = match player.role {
            Role::Citizen => (Some(secret_word.to_string()), Some(category.to_string())),
            Role::Impostor => (None, None),
        };
        Self {
            player: player.id,
            name: player.name.clone(),
            role: player.role,
            secret_word,
            category,
        }
    }
}

/// What the table sees while discussing. No roles, no word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionView {
    pub category: String,
    pub players: Vec<String>,
    pub remaining_secs: u32,
    pub total_secs: u32,
    /// `mm:ss`.
    pub clock: String,
    /// Fraction of time left, 1.0 down to 0.0.
    pub fraction_left: f64,
    pub low_time: bool,
    pub paused: bool,
}

/// The end-of-game summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealSummary {
    pub category: String,
    pub secret_word: String,
    pub impostors: Vec<Player>,
    pub citizens: Vec<Player>,
}

/// Everything the current phase allows a screen to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameSnapshot {
    Configuring {
        draft: SetupDraft,
        categories: Vec<String>,
        /// Why the last `StartGame` was refused, if it was.
        last_error: Option<String>,
    },
    RoleReveal {
        /// Number of players who have already seen their card.
        progress: usize,
        total: usize,
        /// Whose turn it is to hold the device.
        current_name: String,
        /// `Some` only while the card is face up.
        card: Option<RoleCard>,
    },
    Discussion(DiscussionView),
    Reveal(RevealSummary),
}

impl GameSnapshot {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Configuring { .. } => Phase::Configuring,
            Self::RoleReveal { .. } => Phase::RoleReveal,
            Self::Discussion(_) => Phase::Discussion,
            Self::Reveal(_) => Phase::Reveal,
        }
    }
}
