//! Bid decryption stage.
//!
//! Resolves every bid's effective price. Plaintext bids pass through; sealed
//! bids are opened with the enclave key and their price is overwritten by the
//! decrypted one. A bid that cannot be opened is excluded and reported, and
//! the stage carries on with the rest.

use sealbid_types::{
    BidFailure, DecryptedBid, DecryptedPayload, EncryptedBid, EncryptedPrice, ExclusionReason,
    ExclusionRecord, Result, SealbidError,
};
use zeroize::Zeroizing;

use crate::key_manager::KeyManager;

/// Result of the decryption stage. All lists keep input order.
#[derive(Debug, Default)]
pub struct DecryptionOutcome {
    pub decrypted: Vec<DecryptedBid>,
    pub excluded: Vec<ExclusionRecord>,
    pub errors: Vec<BidFailure>,
}

impl DecryptionOutcome {
    fn exclude(&mut self, record: ExclusionRecord, error: SealbidError) {
        self.errors.push(BidFailure {
            bid_id: record.bid_id.clone(),
            error,
        });
        self.excluded.push(record);
    }
}

/// Decrypt all sealed prices in a round.
///
/// Without a key manager the enclave runs degraded: plaintext bids still pass,
/// sealed bids are excluded as `KeyUnavailable`.
pub fn decrypt_all_bids(
    bids: impl IntoIterator<Item = EncryptedBid>,
    key_manager: Option<&KeyManager>,
) -> DecryptionOutcome {
    let mut outcome = DecryptionOutcome::default();

    for EncryptedBid {
        bid,
        encrypted_price,
    } in bids
    {
        let Some(sealed) = encrypted_price else {
            outcome.decrypted.push(DecryptedBid::passthrough(bid));
            continue;
        };

        let Some(km) = key_manager else {
            tracing::warn!(
                bid_id = %bid.id,
                bidder = %bid.bidder,
                "Sealed bid excluded: no enclave key available"
            );
            outcome.exclude(
                ExclusionRecord::for_bid(&bid, ExclusionReason::KeyUnavailable),
                SealbidError::KeyManagerUnavailable,
            );
            continue;
        };

        match open_payload(km, &sealed) {
            Ok(payload) => {
                tracing::debug!(bid_id = %bid.id, "Bid price decrypted");
                outcome
                    .decrypted
                    .push(DecryptedBid::from_payload(bid, payload));
            }
            Err(error) => {
                tracing::warn!(
                    bid_id = %bid.id,
                    bidder = %bid.bidder,
                    error = %error,
                    "Bid excluded: decryption failed"
                );
                outcome.exclude(
                    ExclusionRecord::for_bid(&bid, ExclusionReason::DecryptionFailed),
                    error,
                );
            }
        }
    }

    outcome
}

/// Decrypt and parse a sealed price. Plaintext bytes are wiped on drop.
fn open_payload(km: &KeyManager, sealed: &EncryptedPrice) -> Result<DecryptedPayload> {
    let plaintext = Zeroizing::new(km.decrypt(sealed)?);
    serde_json::from_slice(&plaintext).map_err(|e| SealbidError::PayloadParse {
        detail: e.to_string(),
    })
}
