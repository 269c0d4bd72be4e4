//! Unified error type for Impostor.

use std::path::PathBuf;

use impostor_game::GameError;
use impostor_model::ModelError;
use impostor_setup::{HistoryError, SetupError};

/// Top-level error that wraps every crate-specific error.
///
/// The `#[from]` attributes let `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum ImpostorError {
    /// Building or decoding model data failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The lobby input was refused.
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// The roster store failed.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// An event was refused, or the game is gone.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A word catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A word catalog file holds no categories.
    #[error("catalog {0} has no categories")]
    EmptyCatalog(PathBuf),
}

impl ImpostorError {
    /// The setup error behind this error, if the lobby input was refused
    /// directly or through the game layer.
    pub fn as_setup(&self) -> Option<&SetupError> {
        match self {
            Self::Setup(e) | Self::Game(GameError::Setup(e)) => Some(e),
            _ => None,
        }
    }
}
