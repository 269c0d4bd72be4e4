//! # Impostor
//!
//! A pass-the-device party word game. Every player but one or two gets a
//! secret word; the impostors only know there is one. The table talks
//! for a few minutes, then the roles are revealed.
//!
//! This crate ties the layers together:
//!
//! ```text
//! impostor-model  → Session, Player, Role, Codec
//! impostor-setup  → Configurator, WordCatalog, NameHistory
//! impostor-tick   → one-second tick source
//! impostor-game   → GameMachine, game actor
//! impostor        → GameHost, ImpostorError, init_tracing
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use impostor::prelude::*;
//!
//! # async fn run() -> Result<(), ImpostorError> {
//! impostor::init_tracing();
//! let host = GameHost::builder()
//!     .history_file("impostor-names.json")
//!     .build()?;
//! let handle = host.handle();
//! let GameSnapshot::Configuring { mut draft, .. } = handle.snapshot().await? else {
//!     unreachable!("a new host opens at the lobby");
//! };
//! draft.roster = RosterDraft::from_slots(vec!["Ana".into(), "Bea".into(), "Cleo".into()]);
//! handle.dispatch(GameEvent::StartGame(draft)).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod host;
mod logging;

pub use error::ImpostorError;
pub use host::{GameHost, GameHostBuilder};
pub use logging::{DEFAULT_FILTER, init_tracing, init_tracing_with};

pub use impostor_game as game;
pub use impostor_model as model;
pub use impostor_setup as setup;
pub use impostor_tick as tick;

/// The types a front-end needs to drive a game.
pub mod prelude {
    pub use crate::{GameHost, GameHostBuilder, ImpostorError};
    pub use impostor_game::{
        Countdown, DiscussionView, GameConfig, GameError, GameEvent, GameHandle, GameSnapshot,
        Notice, NoticeReceiver, Phase, RevealSummary, RoleCard, format_clock,
    };
    pub use impostor_model::{CategoryChoice, Player, PlayerId, Role, Session, SessionConfig};
    pub use impostor_setup::{DraftEdit, RosterDraft, SetupDraft, SetupError, WordCatalog};
    pub use impostor_tick::{TickConfig, TickPolicy};
}
