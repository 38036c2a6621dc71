//! Error types for the SealBid enclave.
//!
//! All errors use the `SB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Crypto errors
//! - 2xx: Payload / bid errors
//! - 3xx: Configuration errors
//!
//! Crypto errors never carry key material or plaintext. Where an underlying
//! library produced a cause, it is kept as a separate `detail` string.

use thiserror::Error;

use crate::TokenId;

/// Central error enum for all SealBid operations.
#[derive(Debug, Error)]
pub enum SealbidError {
    // =================================================================
    // Crypto Errors (1xx)
    // =================================================================
    /// A base64 field of the encrypted price was malformed.
    #[error("SB_ERR_100: Failed to decode {field}: {detail}")]
    Decode { field: &'static str, detail: String },

    /// RSA-OAEP unwrap failed. Wrong key and corrupted ciphertext are
    /// deliberately indistinguishable.
    #[error("SB_ERR_101: Failed to decrypt AES key")]
    KeyUnwrap,

    /// The unwrapped symmetric key is not an AES-256 key.
    #[error("SB_ERR_102: Invalid AES key length: expected {expected} bytes, got {actual}")]
    BadKeyLength { expected: usize, actual: usize },

    /// The GCM nonce has the wrong size.
    #[error("SB_ERR_103: Invalid nonce length: expected {expected} bytes, got {actual}")]
    BadNonceLength { expected: usize, actual: usize },

    /// GCM tag mismatch: tampered payload or wrong key.
    #[error("SB_ERR_104: Payload authentication failed")]
    Authentication,

    /// Sealing a payload failed.
    #[error("SB_ERR_105: Encryption failed: {detail}")]
    Encryption { detail: String },

    /// RSA key generation failed.
    #[error("SB_ERR_106: Key generation failed: {detail}")]
    KeyGeneration { detail: String },

    /// Public key export failed.
    #[error("SB_ERR_107: Key encoding failed: {detail}")]
    KeyEncoding { detail: String },

    // =================================================================
    // Payload / Bid Errors (2xx)
    // =================================================================
    /// Decrypted bytes are not a valid price payload.
    #[error("SB_ERR_200: Failed to parse decrypted payload: {detail}")]
    PayloadParse { detail: String },

    /// The resolved price is unusable for ranking. Never carries the price.
    #[error("SB_ERR_201: Invalid price: {reason}")]
    InvalidPrice { reason: &'static str },

    /// The auction token was already consumed.
    #[error("SB_ERR_202: Replay detected for token {0}")]
    ReplayDetected(TokenId),

    // =================================================================
    // Configuration Errors (3xx)
    // =================================================================
    /// An encrypted bid arrived but no enclave key is configured.
    #[error("SB_ERR_300: Key manager unavailable for encrypted bid")]
    KeyManagerUnavailable,

    /// Invalid configuration value.
    #[error("SB_ERR_301: Configuration error: {0}")]
    Configuration(String),
}

impl SealbidError {
    /// Whether this error came from the cryptographic layer.
    #[must_use]
    pub fn is_crypto(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. }
                | Self::KeyUnwrap
                | Self::BadKeyLength { .. }
                | Self::BadNonceLength { .. }
                | Self::Authentication
                | Self::Encryption { .. }
                | Self::KeyGeneration { .. }
                | Self::KeyEncoding { .. }
        )
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SealbidError>;
