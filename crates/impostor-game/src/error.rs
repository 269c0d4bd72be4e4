//! Error types for the game layer.

use impostor_setup::SetupError;

use crate::Phase;

/// Errors returned by [`GameMachine::handle`](crate::GameMachine::handle)
/// and the [`GameHandle`](crate::GameHandle) methods.
///
/// The phase never changes on error. `InvalidEvent` leaves the machine
/// exactly as it was; `Setup` keeps the lobby but stores the submitted
/// draft and the error message.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// `StartGame` was refused by the configurator. The machine stays in
    /// `Configuring` with the submitted draft kept for correction.
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// The event has no transition from the current phase.
    /// For example, `Pause` during `RoleReveal`, or `AdvanceReveal`
    /// before the current card was shown.
    #[error("event {event} is not valid in phase {phase}")]
    InvalidEvent { phase: Phase, event: &'static str },

    /// The game actor has shut down or its channel is closed.
    #[error("game is unavailable")]
    Unavailable,
}
