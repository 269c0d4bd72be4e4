//! Game configuration and the phase state machine.

use impostor_model::SessionConfig;
use impostor_tick::TickConfig;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Settings for one table. Hosts override the defaults field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// The discussion countdown's tick source. One second by default.
    pub tick: TickConfig,

    /// Options a fresh lobby opens with (names come from history).
    pub default_session: SessionConfig,

    /// At or below this many seconds the countdown is flagged as
    /// running low.
    pub low_time_secs: u32,

    /// Capacity of the game actor's command channel.
    pub channel_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick: TickConfig::default(),
            default_session: SessionConfig::default(),
            low_time_secs: 60,
            channel_size: 32,
        }
    }
}

impl GameConfig {
    /// Fixes values that would make the actor unusable.
    pub fn validated(mut self) -> Self {
        self.tick = self.tick.validated();
        if self.channel_size == 0 {
            tracing::warn!("channel_size 0 is invalid: using 1");
            self.channel_size = 1;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The phase a game is in.
///
/// Transitions follow a fixed loop and never skip a phase:
///
/// ```text
/// Configuring → RoleReveal → Discussion → Reveal → Configuring
/// ```
///
/// - **Configuring**: the lobby. No session exists. Entry point, and
///   where `PlayAgain` leads.
/// - **RoleReveal**: the device goes hand to hand; each player privately
///   sees their own role.
/// - **Discussion**: the countdown runs; nobody's role or the word is on
///   screen.
/// - **Reveal**: everything is shown: the word, the category, every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Configuring,
    RoleReveal,
    Discussion,
    Reveal,
}

impl Phase {
    /// The only phase reachable from this one.
    pub fn next(self) -> Self {
        match self {
            Self::Configuring => Self::RoleReveal,
            Self::RoleReveal => Self::Discussion,
            Self::Discussion => Self::Reveal,
            Self::Reveal => Self::Configuring,
        }
    }

    /// Returns `true` if moving to `target` is a valid transition.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == target
    }

    /// Returns `true` if a session exists in this phase.
    pub fn has_session(&self) -> bool {
        !matches!(self, Self::Configuring)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuring => write!(f, "Configuring"),
            Self::RoleReveal => write!(f, "RoleReveal"),
            Self::Discussion => write!(f, "Discussion"),
            Self::Reveal => write!(f, "Reveal"),
        }
    }
}
