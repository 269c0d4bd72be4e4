//! Data model for Impostor.
//!
//! This crate defines the values every other layer passes around:
//!
//! - **Types** ([`Player`], [`Role`], [`Session`], [`SessionConfig`],
//!   [`CategoryChoice`]): the record of one game and the request that
//!   produced it.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how durable data (the
//!   remembered roster) is turned into bytes and back.
//! - **Errors** ([`ModelError`]): what can go wrong building or decoding
//!   those values.
//!
//! # Architecture
//!
//! The model sits at the bottom of the stack. It knows nothing about
//! catalogs, timers, or phases:
//!
//! ```text
//! Setup (finalize) → Model (Session) → Game (phases, countdown)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ModelError;
pub use types::{CategoryChoice, Player, PlayerId, Role, Session, SessionConfig};
