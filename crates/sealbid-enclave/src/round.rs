//! One sealed-bid auction round, end to end.
//!
//! ```text
//! EncryptedBid[] ──decrypt_all_bids──▶ DecryptedBid[] ──filter_admissible──▶ Bid[] ──rank_bids──▶ RankingResult
//!                        │                                    │
//!                        └──── excluded + errors ─────────────┴──── excluded
//! ```
//!
//! The round never mutates the token store. It reports which token each
//! admitted bid carried so that settlement can spend the winner's.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use sealbid_ranking::{compute_ranking_root, rank_bids};
use sealbid_types::{Bid, BidFailure, EncryptedBid, ExclusionRecord, RankingResult, TokenId};

use crate::{decryption::decrypt_all_bids, key_manager::KeyManager, replay_filter::filter_admissible};

/// Everything a round produces.
#[derive(Debug)]
pub struct RoundOutcome {
    pub ranking: RankingResult,
    /// SHA-256 commitment over `ranking`.
    pub ranking_root: [u8; 32],
    /// Decryption-stage exclusions first, then filter exclusions.
    pub excluded: Vec<ExclusionRecord>,
    pub errors: Vec<BidFailure>,
    /// Bid ID → token carried by that admitted bid.
    pub admitted_tokens: BTreeMap<String, TokenId>,
}

impl RoundOutcome {
    /// Token carried by the winning bid, if any.
    #[must_use]
    pub fn winning_token(&self) -> Option<&TokenId> {
        let (_, bid) = self.ranking.winner()?;
        self.admitted_tokens.get(&bid.id)
    }
}

/// Runs auction rounds against one enclave key.
#[derive(Debug, Clone)]
pub struct AuctionRound {
    key_manager: Option<Arc<KeyManager>>,
}

impl AuctionRound {
    #[must_use]
    pub fn new(key_manager: Option<Arc<KeyManager>>) -> Self {
        if key_manager.is_none() {
            tracing::warn!("Auction round created without a key manager; sealed bids will be excluded");
        }
        Self { key_manager }
    }

    #[must_use]
    pub fn key_manager(&self) -> Option<&KeyManager> {
        self.key_manager.as_deref()
    }

    /// Decrypt, filter, and rank one round of bids.
    #[must_use]
    pub fn run(&self, bids: Vec<EncryptedBid>, consumed_tokens: &HashSet<TokenId>) -> RoundOutcome {
        let submitted = bids.len();

        let decryption = decrypt_all_bids(bids, self.key_manager());
        let filtered = filter_admissible(decryption.decrypted, consumed_tokens);

        let mut excluded = decryption.excluded;
        excluded.extend(filtered.excluded);

        let mut admitted_tokens = BTreeMap::new();
        let admissible: Vec<Bid> = filtered
            .admissible
            .into_iter()
            .map(|d| {
                if let Some(token) = d.token() {
                    admitted_tokens.insert(d.bid.id.clone(), token.clone());
                }
                d.bid
            })
            .collect();

        let ranking = rank_bids(&admissible);
        let ranking_root = compute_ranking_root(&ranking);

        tracing::info!(
            submitted,
            admitted = admissible.len(),
            excluded = excluded.len(),
            errors = decryption.errors.len(),
            bidders = ranking.len(),
            winner = ranking.winner().map(|(bidder, _)| bidder),
            ranking_root = %hex::encode(ranking_root),
            "Auction round complete"
        );

        RoundOutcome {
            ranking,
            ranking_root,
            excluded,
            errors: decryption.errors,
            admitted_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sealbid_ranking::verify_ranking_root;
    use sealbid_types::{EncryptedPrice, ExclusionReason};

    use super::*;
    use crate::test_keys::{seal_price, shared_keys_arc};

    fn sealed(id: &str, bidder: &str, cents: i64, token: Option<&str>) -> EncryptedBid {
        let km = shared_keys_arc();
        EncryptedBid::sealed(
            Bid::dummy(id, bidder, Decimal::ZERO),
            seal_price(&km, Decimal::new(cents, 2), token),
        )
    }

    fn plain(id: &str, bidder: &str, cents: i64) -> EncryptedBid {
        EncryptedBid::plaintext(Bid::dummy(id, bidder, Decimal::new(cents, 2)))
    }

    #[test]
    fn encrypted_beats_plaintext() {
        let round = AuctionRound::new(Some(shared_keys_arc()));
        let out = round.run(
            vec![
                sealed("bid-1", "bidder-a", 725, None),
                plain("bid-2", "bidder-b", 250),
            ],
            &HashSet::new(),
        );
        let (winner, bid) = out.ranking.winner().unwrap();
        assert_eq!(winner, "bidder-a");
        assert_eq!(bid.price, Decimal::new(725, 2));
        assert_eq!(out.ranking.rank_of("bidder-b"), Some(2));
        assert!(out.excluded.is_empty());
        assert!(verify_ranking_root(&out.ranking, &out.ranking_root));
    }

    #[test]
    fn exclusions_are_ordered_by_stage() {
        let round = AuctionRound::new(Some(shared_keys_arc()));
        let broken = EncryptedBid::sealed(
            Bid::dummy("bid-bad", "bidder-x", Decimal::ZERO),
            EncryptedPrice {
                aes_key_encrypted: "!!".into(),
                encrypted_payload: "!!".into(),
                nonce: "!!".into(),
            },
        );
        let out = round.run(
            vec![plain("bid-neg", "bidder-y", -100), broken, plain("bid-ok", "bidder-z", 100)],
            &HashSet::new(),
        );

        let reasons: Vec<ExclusionReason> = out.excluded.iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            [ExclusionReason::DecryptionFailed, ExclusionReason::InvalidPrice]
        );
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.ranking.sorted_bidders, ["bidder-z"]);
    }

    #[test]
    fn replayed_token_is_excluded_and_fresh_token_reported() {
        let round = AuctionRound::new(Some(shared_keys_arc()));
        let consumed: HashSet<TokenId> = [TokenId::new("spent")].into_iter().collect();
        let out = round.run(
            vec![
                sealed("bid-1", "bidder-a", 900, Some("spent")),
                sealed("bid-2", "bidder-b", 400, Some("fresh")),
            ],
            &consumed,
        );

        assert_eq!(out.excluded.len(), 1);
        assert_eq!(out.excluded[0].reason, ExclusionReason::ReplayDetected);
        assert_eq!(out.ranking.winner().unwrap().0, "bidder-b");
        assert_eq!(out.winning_token(), Some(&TokenId::new("fresh")));
        assert_eq!(out.admitted_tokens.len(), 1);
    }

    #[test]
    fn degraded_round_without_key() {
        let round = AuctionRound::new(None);
        let out = round.run(
            vec![sealed("bid-1", "bidder-a", 900, None), plain("bid-2", "bidder-b", 100)],
            &HashSet::new(),
        );
        assert_eq!(out.excluded[0].reason, ExclusionReason::KeyUnavailable);
        assert_eq!(out.ranking.winner().unwrap().0, "bidder-b");
        assert!(out.winning_token().is_none());
    }

    #[test]
    fn empty_round() {
        let round = AuctionRound::new(Some(shared_keys_arc()));
        let out = round.run(Vec::new(), &HashSet::new());
        assert!(out.ranking.is_empty());
        assert!(out.winning_token().is_none());
        assert!(verify_ranking_root(&out.ranking, &out.ranking_root));
    }
}
