//! Error types for the setup layer.

use impostor_model::ModelError;

/// Why a lobby configuration could not become a session.
///
/// All of these are detected synchronously inside
/// [`Configurator::finalize`](crate::Configurator::finalize) and none is
/// retried: the lobby shows the message and the player fixes the field.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Fewer than three non-blank names after trimming.
    #[error("need at least {required} players, got {found}")]
    InsufficientPlayers { found: usize, required: usize },

    /// Impostor count outside `1..=2`, or not strictly below the player count.
    #[error("cannot deal {requested} impostor(s) among {players} players")]
    InvalidImpostorCount { requested: usize, players: usize },

    /// Duration is zero (or too large to express in seconds).
    #[error("invalid duration: {0} minute(s)")]
    InvalidDuration(u32),

    /// The requested category is not in the catalog.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The resolved category has no words. Only reachable with a broken
    /// catalog.
    #[error("category {0} has no words")]
    EmptyCategory(String),

    /// The dealt roster failed the session's own invariant checks.
    #[error(transparent)]
    Inconsistent(#[from] ModelError),
}

/// Failures of the durable name-history slot.
///
/// These never reach the player: [`NameHistory`](crate::NameHistory)
/// logs them and carries on with what it has in memory.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("name history i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("name history data: {0}")]
    Codec(#[from] ModelError),
}
