//! Admissibility gate between decryption and ranking.
//!
//! Every decrypted bid goes through the same two checks, in order:
//! 1. price must have a decimal form and be strictly positive
//! 2. its auction token (if any) must not be in the consumed set
//!
//! Fail-closed: a bid failing either check never reaches the ranker. The
//! filter only reads `consumed_tokens`; spending tokens happens at settlement.

use std::collections::HashSet;

use rust_decimal::Decimal;
use sealbid_types::{DecryptedBid, ExclusionReason, ExclusionRecord, Result, SealbidError, TokenId};

/// Bids split into admissible and excluded. Both keep input order.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub admissible: Vec<DecryptedBid>,
    pub excluded: Vec<ExclusionRecord>,
}

/// Run the admissibility checks over a round's decrypted bids.
#[must_use]
pub fn filter_admissible(
    decrypted: Vec<DecryptedBid>,
    consumed_tokens: &HashSet<TokenId>,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for candidate in decrypted {
        match check_bid(&candidate, consumed_tokens) {
            Ok(()) => outcome.admissible.push(candidate),
            Err(error) => {
                let reason = match error {
                    SealbidError::ReplayDetected(_) => ExclusionReason::ReplayDetected,
                    _ => ExclusionReason::InvalidPrice,
                };
                tracing::warn!(
                    bid_id = %candidate.bid.id,
                    bidder = %candidate.bid.bidder,
                    %reason,
                    "Bid excluded"
                );
                outcome
                    .excluded
                    .push(ExclusionRecord::for_bid(&candidate.bid, reason));
            }
        }
    }

    outcome
}

/// Validate one bid.
///
/// # Errors
/// - `InvalidPrice` if a sealed price is non-finite or outside decimal
///   range, or if the price is zero or negative
/// - `ReplayDetected` if the bid carries an already-consumed token
pub fn check_bid(candidate: &DecryptedBid, consumed_tokens: &HashSet<TokenId>) -> Result<()> {
    let Some(price) = candidate.effective_price() else {
        return Err(SealbidError::InvalidPrice {
            reason: "not representable as a decimal",
        });
    };
    if price <= Decimal::ZERO {
        return Err(SealbidError::InvalidPrice {
            reason: "not strictly positive",
        });
    }

    if let Some(token) = candidate.token() {
        if consumed_tokens.contains(token) {
            return Err(SealbidError::ReplayDetected(token.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use sealbid_types::{Bid, DecryptedPayload};

    use super::*;

    fn bid(id: &str, price: Decimal, token: Option<&str>) -> DecryptedBid {
        DecryptedBid {
            auction_token: token.map(TokenId::new),
            ..DecryptedBid::passthrough(Bid::dummy(id, &format!("bidder-{id}"), price))
        }
    }

    fn sealed(id: &str, price: f64) -> DecryptedBid {
        DecryptedBid::from_payload(
            Bid::dummy(id, &format!("bidder-{id}"), Decimal::ZERO),
            DecryptedPayload {
                price,
                auction_token: None,
            },
        )
    }

    fn consumed(ids: &[&str]) -> HashSet<TokenId> {
        ids.iter().map(|s| TokenId::new(*s)).collect()
    }

    #[test]
    fn positive_price_without_token_is_admissible() {
        let out = filter_admissible(vec![bid("1", Decimal::new(250, 2), None)], &HashSet::new());
        assert_eq!(out.admissible.len(), 1);
        assert!(out.excluded.is_empty());
    }

    #[test]
    fn zero_and_negative_prices_excluded() {
        let out = filter_admissible(
            vec![
                bid("zero", Decimal::ZERO, None),
                bid("neg", Decimal::new(-150, 2), None),
                bid("ok", Decimal::new(1, 2), None),
            ],
            &HashSet::new(),
        );
        assert_eq!(out.admissible.len(), 1);
        assert_eq!(out.admissible[0].bid.id, "ok");
        assert_eq!(out.excluded.len(), 2);
        assert!(
            out.excluded
                .iter()
                .all(|r| r.reason == ExclusionReason::InvalidPrice)
        );
        assert_eq!(out.excluded[0].bid_id, "zero");
        assert_eq!(out.excluded[1].bid_id, "neg");
    }

    #[test]
    fn consumed_token_is_replay() {
        let out = filter_admissible(
            vec![
                bid("1", Decimal::ONE, Some("spent")),
                bid("2", Decimal::ONE, Some("fresh")),
            ],
            &consumed(&["spent"]),
        );
        assert_eq!(out.admissible.len(), 1);
        assert_eq!(out.admissible[0].bid.id, "2");
        assert_eq!(out.excluded[0].reason, ExclusionReason::ReplayDetected);
        assert_eq!(out.excluded[0].bidder, "bidder-1");
    }

    #[test]
    fn price_check_runs_before_replay_check() {
        let err = check_bid(&bid("1", Decimal::ZERO, Some("spent")), &consumed(&["spent"]))
            .unwrap_err();
        assert!(matches!(err, SealbidError::InvalidPrice { .. }));
    }

    #[test]
    fn tokenless_bids_skip_replay_check() {
        let out = filter_admissible(vec![bid("1", Decimal::ONE, None)], &consumed(&["spent"]));
        assert_eq!(out.admissible.len(), 1);
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let out = filter_admissible(vec![bid("1", Decimal::ONE, Some(""))], &consumed(&[""]));
        assert_eq!(out.admissible.len(), 1);
    }

    #[test]
    fn replay_error_names_the_token() {
        let err = check_bid(&bid("1", Decimal::TEN, Some("spent")), &consumed(&["spent"]))
            .unwrap_err();
        assert!(matches!(err, SealbidError::ReplayDetected(ref t) if t.as_str() == "spent"));
    }

    #[test]
    fn order_preserved() {
        let bids: Vec<_> = (1..=5)
            .map(|i| bid(&i.to_string(), Decimal::from(i), None))
            .collect();
        let out = filter_admissible(bids, &HashSet::new());
        let ids: Vec<&str> = out.admissible.iter().map(|d| d.bid.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn unrepresentable_sealed_prices_are_invalid() {
        let out = filter_admissible(
            vec![
                sealed("huge", 1e30),
                sealed("tiny", 1e-30),
                sealed("ok", 2.5),
            ],
            &HashSet::new(),
        );
        assert_eq!(out.admissible.len(), 1);
        assert_eq!(out.admissible[0].bid.price, Decimal::new(25, 1));
        let excluded: Vec<(&str, ExclusionReason)> = out
            .excluded
            .iter()
            .map(|r| (r.bid_id.as_str(), r.reason))
            .collect();
        assert_eq!(
            excluded,
            [
                ("huge", ExclusionReason::InvalidPrice),
                ("tiny", ExclusionReason::InvalidPrice),
            ]
        );
    }

    #[test]
    fn non_finite_sealed_price_is_invalid() {
        for raw in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = check_bid(&sealed("1", raw), &HashSet::new()).unwrap_err();
            assert!(matches!(err, SealbidError::InvalidPrice { .. }));
        }
    }
}
