//! # sealbid-types
//!
//! Shared types, errors, and configuration for the **SealBid** auction enclave.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines the data contract exchanged between the host
//! and the enclave:
//!
//! - **Identifiers**: [`TokenId`]
//! - **Bid model**: [`Bid`], [`EncryptedBid`], [`EncryptedPrice`], [`DecryptedPayload`], [`DecryptedBid`]
//! - **Ranking model**: [`RankingResult`]
//! - **Exclusion model**: [`ExclusionRecord`], [`ExclusionReason`], [`BidFailure`]
//! - **Configuration**: [`EnclaveConfig`]
//! - **Errors**: [`SealbidError`] with `SB_ERR_` prefix codes
//! - **Constants**: crypto sizes and cleanup defaults

pub mod bid;
pub mod config;
pub mod constants;
pub mod error;
pub mod exclusion;
pub mod ids;
pub mod ranking;

// Re-export all primary types at crate root for ergonomic imports:
//   use sealbid_types::{Bid, EncryptedBid, RankingResult, ...};

pub use bid::*;
pub use config::*;
pub use error::*;
pub use exclusion::*;
pub use ids::*;
pub use ranking::*;

// Constants are accessed via `sealbid_types::constants::FOO`
// (not re-exported to avoid name collisions).
