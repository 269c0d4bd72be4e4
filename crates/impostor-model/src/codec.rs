//! Codec trait and implementations for durable data.
//!
//! A "codec" (coder/decoder) converts between Rust values and raw bytes.
//! The name-history store only needs *something* that implements
//! [`Codec`]; it never names `serde_json` directly. Swapping the format
//! later means adding another implementation, not touching the store.

use serde::{Serialize, de::DeserializeOwned};

use crate::ModelError;

/// A codec that can encode Rust values to bytes and decode bytes back.
///
/// `Send + Sync + 'static` lets a codec live inside a store that is moved
/// into the game actor's task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ModelError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ModelError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ModelError::Decode` if the bytes are malformed or don't
    /// match the expected shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ModelError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// JSON keeps the remembered roster readable and hand-editable, which is
/// all a list of a dozen names needs.
///
/// ## Example
///
/// ```rust
/// use impostor_model::{Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let names = vec!["Ana".to_string(), "Bea".to_string()];
///
/// let bytes = codec.encode(&names).unwrap();
/// assert_eq!(bytes, br#"["Ana","Bea"]"#);
///
/// let decoded: Vec<String> = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, names);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ModelError> {
        serde_json::to_vec(value).map_err(ModelError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ModelError> {
        serde_json::from_slice(data).map_err(ModelError::Decode)
    }
}
