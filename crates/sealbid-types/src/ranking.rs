//! Ranking output produced by the auction ranker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Bid;

/// Per-bidder ranking of one auction round.
///
/// The three views always agree: `ranks[b] == 1 + index of b in
/// sorted_bidders`, and `highest_bids[b]` is the bid the ranker retained for
/// `b`. Ordered maps keep the serialized form byte-stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingResult {
    /// Bidder → rank (1 = winner).
    pub ranks: BTreeMap<String, usize>,
    /// Bidder → that bidder's highest admissible bid.
    pub highest_bids: BTreeMap<String, Bid>,
    /// Bidders by descending price.
    pub sorted_bidders: Vec<String>,
}

impl RankingResult {
    /// The rank-1 bidder and bid, if any bids were ranked.
    #[must_use]
    pub fn winner(&self) -> Option<(&str, &Bid)> {
        let bidder = self.sorted_bidders.first()?;
        self.highest_bids
            .get(bidder)
            .map(|bid| (bidder.as_str(), bid))
    }

    #[must_use]
    pub fn rank_of(&self, bidder: &str) -> Option<usize> {
        self.ranks.get(bidder).copied()
    }

    /// Number of distinct bidders ranked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted_bidders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted_bidders.is_empty()
    }
}
