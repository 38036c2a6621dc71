//! # sealbid-ranking
//!
//! **Pure deterministic auction ranking for SealBid.**
//!
//! The ranker is the compute plane -- it takes the admissible bids of one
//! round and produces a [`RankingResult`](sealbid_types::RankingResult). It has:
//!
//! - **Zero side effects**: no crypto, no token state, no filtering logic
//! - **Deterministic output**: same input order -> same ranking, byte for byte
//! - **One bid per bidder**: only each bidder's highest bid is ranked
//! - **Auditability**: a SHA-256 ranking root commits to the outcome

pub mod determinism;
pub mod ranker;

pub use determinism::{compute_ranking_root, ranking_root_hex, verify_ranking_root};
pub use ranker::rank_bids;
