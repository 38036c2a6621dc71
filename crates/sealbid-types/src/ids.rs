//! Identifiers used throughout SealBid.
//!
//! Bid and bidder identifiers are opaque strings assigned by the host and are
//! carried as plain `String`s on [`crate::Bid`]. Auction tokens are minted by
//! the enclave itself and get a dedicated newtype.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Single-use auction token identifier (replay protection).
///
/// Tokens issued by the enclave are 256 bits of CSPRNG output, hex-encoded.
/// Tokens arriving inside decrypted payloads are accepted verbatim: the
/// bidder may echo any string and the filter decides what it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Encode raw entropy as a token identifier.
    #[must_use]
    pub fn from_entropy(bytes: &[u8; constants::TOKEN_ENTROPY_BYTES]) -> Self {
        Self(hex::encode(bytes))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shortened form for log lines.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tok:{}", self.short())
    }
}

impl From<&str> for TokenId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TokenId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for TokenId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entropy_is_hex() {
        let id = TokenId::from_entropy(&[0xAB; constants::TOKEN_ENTROPY_BYTES]);
        assert_eq!(id.as_str().len(), constants::TOKEN_ENTROPY_BYTES * 2);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn display_is_shortened() {
        let id = TokenId::new("0123456789abcdef");
        assert_eq!(format!("{id}"), "tok:01234567");
    }

    #[test]
    fn short_handles_tiny_ids() {
        let id = TokenId::new("abc");
        assert_eq!(id.short(), "abc");
    }

    #[test]
    fn serde_is_transparent() {
        let id = TokenId::new("t-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t-1\"");
        let back: TokenId = serde_json::from_str("\"t-1\"").unwrap();
        assert_eq!(back, id);
    }
}
