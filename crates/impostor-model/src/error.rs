//! Error types for the model layer.
//!
//! Each crate in Impostor defines its own error enum, so a `ModelError`
//! always points at data that is malformed, never at a rule of play.

/// Errors that can occur while building or (de)serializing model values.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: a truncated file, a hand-edited file, or data
    /// written by something other than this crate.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A session record breaks one of its invariants (too few players,
    /// impostor tally out of range, ...).
    #[error("invalid session: {0}")]
    InvalidSession(String),

    /// A player id string is not of the form `player-<index>`.
    #[error("invalid player id: {0}")]
    InvalidPlayerId(String),
}
