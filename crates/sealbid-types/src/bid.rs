//! Bid submission types: the host → enclave data contract.
//!
//! A bidder either sends a plaintext `price` or attaches an
//! [`EncryptedPrice`] sealed to the enclave's public key. When the
//! encrypted form is present the plaintext price is ignored entirely.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TokenId;

/// A single auction bid.
///
/// Created by the host from an auction request and immutable once it enters
/// the pipeline. `price` is zero when the real price travels encrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Host-assigned bid identifier.
    pub id: String,
    /// Bidder identifier. Ranking groups on this field.
    pub bidder: String,
    /// Bid price (CPM, currency-denominated). Ignored when encrypted.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// ISO currency code.
    #[serde(default)]
    pub currency: String,
    /// Optional private-marketplace deal identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<String>,
    /// Optional bid-type tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_type: Option<String>,
}

impl Bid {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        bidder: impl Into<String>,
        price: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            bidder: bidder.into(),
            price,
            currency: currency.into(),
            deal_id: None,
            bid_type: None,
        }
    }

    #[must_use]
    pub fn with_deal(mut self, deal_id: impl Into<String>) -> Self {
        self.deal_id = Some(deal_id.into());
        self
    }

    #[must_use]
    pub fn with_bid_type(mut self, bid_type: impl Into<String>) -> Self {
        self.bid_type = Some(bid_type.into());
        self
    }
}

/// Hybrid-encrypted price (RSA-OAEP-SHA256 wrapped key + AES-256-GCM payload).
///
/// All three fields are standard base64. The payload decrypts to a JSON
/// [`DecryptedPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPrice {
    /// RSA-OAEP encrypted AES-256 key.
    pub aes_key_encrypted: String,
    /// AES-GCM ciphertext (with tag) of `{"price": X, "auction_token": "..."}`.
    pub encrypted_payload: String,
    /// 12-byte GCM nonce.
    pub nonce: String,
}

/// A bid as submitted by the host: the bid fields plus an optional
/// encrypted price, flattened into one JSON object on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBid {
    #[serde(flatten)]
    pub bid: Bid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_price: Option<EncryptedPrice>,
}

impl EncryptedBid {
    /// A bid carrying only a plaintext price.
    #[must_use]
    pub fn plaintext(bid: Bid) -> Self {
        Self {
            bid,
            encrypted_price: None,
        }
    }

    /// A bid whose price travels sealed to the enclave key.
    #[must_use]
    pub fn sealed(bid: Bid, encrypted_price: EncryptedPrice) -> Self {
        Self {
            bid,
            encrypted_price: Some(encrypted_price),
        }
    }

    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        self.encrypted_price.is_some()
    }
}

/// The cleartext structure inside [`EncryptedPrice::encrypted_payload`].
///
/// Exists only transiently inside the enclave. `Debug` redacts the price so
/// it cannot leak through log formatting. The price is a JSON number decoded
/// as `f64`; range and sign are checked by the admissibility filter, not here.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DecryptedPayload {
    /// Bid price in USD.
    pub price: f64,
    /// Optional single-use token for replay protection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction_token: Option<TokenId>,
}

impl fmt::Debug for DecryptedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptedPayload")
            .field("price", &"<redacted>")
            .field("auction_token", &self.auction_token)
            .finish()
    }
}

/// A bid whose price has been resolved inside the enclave.
#[derive(Debug, Clone, PartialEq)]
pub struct DecryptedBid {
    /// The bid with its effective price.
    pub bid: Bid,
    /// Token carried forward from the decrypted payload, if any.
    pub auction_token: Option<TokenId>,
    /// The price exactly as decrypted, for sealed bids. `bid.price` holds its
    /// decimal form, or zero when it has none.
    pub sealed_price: Option<f64>,
}

impl DecryptedBid {
    /// A bid whose plaintext price is taken as-is.
    #[must_use]
    pub fn passthrough(bid: Bid) -> Self {
        Self {
            bid,
            auction_token: None,
            sealed_price: None,
        }
    }

    /// A sealed bid whose price and token come from its decrypted payload.
    /// The decrypted price always replaces the plaintext one.
    #[must_use]
    pub fn from_payload(mut bid: Bid, payload: DecryptedPayload) -> Self {
        bid.price = sealed_to_decimal(payload.price).unwrap_or_default();
        Self {
            bid,
            auction_token: payload.auction_token,
            sealed_price: Some(payload.price),
        }
    }

    /// The price to rank on, or `None` if a sealed price has no non-zero
    /// decimal form (non-finite, out of range, or below decimal precision).
    #[must_use]
    pub fn effective_price(&self) -> Option<Decimal> {
        match self.sealed_price {
            Some(raw) => sealed_to_decimal(raw),
            None => Some(self.bid.price),
        }
    }

    /// Token to check for replay. Empty tokens count as absent.
    #[must_use]
    pub fn token(&self) -> Option<&TokenId> {
        self.auction_token.as_ref().filter(|t| !t.is_empty())
    }
}

fn sealed_to_decimal(raw: f64) -> Option<Decimal> {
    if !raw.is_finite() {
        return None;
    }
    Decimal::try_from(raw).ok().filter(|d| !d.is_zero())
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Bid {
    /// USD bid with no deal or type tag.
    pub fn dummy(id: &str, bidder: &str, price: Decimal) -> Self {
        Self::new(id, bidder, price, "USD")
    }
}
