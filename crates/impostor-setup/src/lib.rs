//! Game setup for Impostor.
//!
//! This crate turns what was typed at the lobby into a playable
//! [`Session`](impostor_model::Session):
//!
//! 1. **Drafting**: the editable roster and options ([`SetupDraft`])
//! 2. **Finalizing**: validation, category and word draw, role dealing
//!    ([`Configurator`])
//! 3. **Remembering**: the last roster, kept for the next game
//!    ([`NameHistory`] over a [`NameHistoryStore`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Game Layer (above)   ← drives finalize() on StartGame
//!     ↕
//! Setup Layer (this crate)  ← validation, randomness, roster memory
//!     ↕
//! Model Layer (below)  ← Session, Player, SessionConfig, Codec
//! ```

mod catalog;
mod configurator;
mod error;
mod history;
mod roster;

pub use catalog::{Category, WordCatalog};
pub use configurator::{Configurator, assign_roles, normalize_names};
pub use error::{HistoryError, SetupError};
pub use history::{FileHistoryStore, MemoryHistoryStore, NameHistory, NameHistoryStore};
pub use roster::{DraftEdit, RosterDraft, SetupDraft};
