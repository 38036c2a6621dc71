//! Ranking commitments for audit.
//!
//! Winner selection must be reproducible: an auditor replaying the same
//! admissible bids must arrive at the same outcome. The `ranking_root` is a
//! SHA-256 hash over the ranked outcome that can be published without
//! revealing the bids, then checked against a replay.

use sealbid_types::RankingResult;
use sha2::{Digest, Sha256};

/// Compute the ranking root over a ranking result.
///
/// Commits to, in rank order:
/// - Bidder ID and rank
/// - Retained bid ID, price, and currency
///
/// The same ranking always produces the same root; reordering changes it.
#[must_use]
pub fn compute_ranking_root(result: &RankingResult) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"sealbid:ranking_root:v1:");
    hasher.update((result.sorted_bidders.len() as u64).to_le_bytes());

    for bidder in &result.sorted_bidders {
        hasher.update((bidder.len() as u64).to_le_bytes());
        hasher.update(bidder.as_bytes());
        let rank = result.ranks.get(bidder).copied().unwrap_or_default();
        hasher.update((rank as u64).to_le_bytes());
        if let Some(bid) = result.highest_bids.get(bidder) {
            hasher.update((bid.id.len() as u64).to_le_bytes());
            hasher.update(bid.id.as_bytes());
            hasher.update(bid.price.normalize().to_string().as_bytes());
            hasher.update(b"|");
            hasher.update(bid.currency.as_bytes());
        }
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Verify that a ranking result matches a published root.
#[must_use]
pub fn verify_ranking_root(result: &RankingResult, expected_root: &[u8; 32]) -> bool {
    compute_ranking_root(result) == *expected_root
}

/// Hex form of the ranking root, for logs and round reports.
#[must_use]
pub fn ranking_root_hex(result: &RankingResult) -> String {
    hex::encode(compute_ranking_root(result))
}
