//! Game flow for Impostor.
//!
//! One game runs through four phases, driven only by events:
//!
//! ```text
//! Configuring → RoleReveal → Discussion → Reveal → Configuring → ...
//! ```
//!
//! # Key types
//!
//! - [`GameMachine`]: the synchronous state machine; the single owner of
//!   the current [`Session`](impostor_model::Session)
//! - [`GameEvent`] / [`Notice`]: what goes in, what comes out
//! - [`GameSnapshot`]: what a screen may show in the current phase
//! - [`Countdown`]: the discussion timer's value
//! - [`GameHandle`]: talks to a machine running inside its own Tokio
//!   task together with the one-second tick source
//! - [`GameConfig`] / [`Phase`]: settings and the phase enum

mod actor;
mod config;
mod countdown;
mod error;
mod event;
mod machine;

pub use actor::{GameHandle, NoticeReceiver, spawn_game};
pub use config::{GameConfig, Phase};
pub use countdown::{Countdown, format_clock};
pub use error::GameError;
pub use event::{DiscussionView, GameEvent, GameSnapshot, Notice, RevealSummary, RoleCard};
pub use machine::GameMachine;
