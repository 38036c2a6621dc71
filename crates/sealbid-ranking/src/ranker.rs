//! Per-bidder price ranking.
//!
//! ```text
//! rank_bids(&[Bid]) -> RankingResult
//! ```
//!
//! ## Tie-breaking
//!
//! - Same bidder, equal price: the first-encountered bid is retained.
//! - Different bidders, equal price: the bidder that appeared first in the
//!   input ranks higher. The sort is stable over first-appearance order, so
//!   the same input always yields the same winner.

use std::collections::HashMap;

use sealbid_types::{Bid, RankingResult};

/// Rank bids by price, keeping only each bidder's highest bid.
///
/// ## Algorithm
///
/// 1. Empty input → empty result
/// 2. Group by bidder, retaining the strictly highest price (first wins ties)
/// 3. Stable-sort retained bids by price, descending
/// 4. Assign ranks 1..N in sorted order
#[must_use]
pub fn rank_bids(bids: &[Bid]) -> RankingResult {
    if bids.is_empty() {
        return RankingResult::default();
    }

    // Retained bid per bidder, in first-appearance order.
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(bids.len());
    let mut entries: Vec<&Bid> = Vec::new();
    for bid in bids {
        if let Some(&idx) = slots.get(bid.bidder.as_str()) {
            if bid.price > entries[idx].price {
                entries[idx] = bid;
            }
        } else {
            slots.insert(bid.bidder.as_str(), entries.len());
            entries.push(bid);
        }
    }

    // `sort_by` is stable: equal prices keep first-appearance order.
    entries.sort_by(|a, b| b.price.cmp(&a.price));

    let mut result = RankingResult {
        sorted_bidders: Vec::with_capacity(entries.len()),
        ..RankingResult::default()
    };
    for (idx, bid) in entries.into_iter().enumerate() {
        result.ranks.insert(bid.bidder.clone(), idx + 1);
        result.highest_bids.insert(bid.bidder.clone(), bid.clone());
        result.sorted_bidders.push(bid.bidder.clone());
    }

    tracing::debug!(
        bids = bids.len(),
        bidders = result.sorted_bidders.len(),
        winner = result.sorted_bidders.first().map(String::as_str),
        "Bids ranked"
    );

    result
}
