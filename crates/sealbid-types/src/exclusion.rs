//! Exclusion reporting: why a bid was dropped from a round.
//!
//! Every bid that does not reach the ranker produces exactly one
//! [`ExclusionRecord`]. Decryption-stage exclusions additionally produce a
//! [`BidFailure`] carrying the typed error for diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Bid, SealbidError};

/// Reason code attached to an excluded bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The encrypted price could not be decrypted or parsed.
    DecryptionFailed,
    /// The bid arrived encrypted but no enclave key is configured.
    KeyUnavailable,
    /// The resolved price is not strictly positive.
    InvalidPrice,
    /// The bid's auction token was already spent.
    ReplayDetected,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecryptionFailed => write!(f, "decryption failed"),
            Self::KeyUnavailable => write!(f, "key unavailable"),
            Self::InvalidPrice => write!(f, "invalid price"),
            Self::ReplayDetected => write!(f, "replay detected"),
        }
    }
}

/// A bid dropped from consideration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRecord {
    pub bid_id: String,
    pub bidder: String,
    pub reason: ExclusionReason,
}

impl ExclusionRecord {
    #[must_use]
    pub fn for_bid(bid: &Bid, reason: ExclusionReason) -> Self {
        Self {
            bid_id: bid.id.clone(),
            bidder: bid.bidder.clone(),
            reason,
        }
    }
}

/// Error report for a bid that failed in the decryption stage.
#[derive(Debug)]
pub struct BidFailure {
    pub bid_id: String,
    pub error: SealbidError,
}

impl fmt::Display for BidFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bid {}: {}", self.bid_id, self.error)
    }
}
