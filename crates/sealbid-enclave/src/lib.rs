//! # sealbid-enclave
//!
//! **Secure Envelope Plane**: everything that touches sealed prices or
//! replay state runs here, inside the TEE.
//!
//! ## Architecture
//!
//! 1. **KeyManager**: holds the enclave RSA key pair, exports the public key
//! 2. **crypto**: hybrid RSA-OAEP + AES-256-GCM sealing and opening
//! 3. **TokenStore**: single-use auction tokens with background expiry
//! 4. **decryption**: resolves each bid's effective price
//! 5. **replay_filter**: hard gate on price and token reuse
//! 6. **AuctionRound**: decrypt → filter → rank, with a ranking root
//!
//! ## Bid Flow
//!
//! ```text
//! host → EncryptedBid[] → decrypt_all_bids() → filter_admissible()
//!      → rank_bids() → RoundOutcome → host settles, TokenStore.consume_all()
//! ```
//!
//! Prices, decrypted payloads, and key material are never logged.

pub mod crypto;
pub mod decryption;
pub mod key_manager;
pub mod replay_filter;
pub mod round;
pub mod token_store;

#[cfg(test)]
mod test_keys;

pub use crypto::{decrypt_hybrid, encrypt_hybrid};
pub use decryption::{DecryptionOutcome, decrypt_all_bids};
pub use key_manager::KeyManager;
pub use replay_filter::{FilterOutcome, check_bid, filter_admissible};
pub use round::{AuctionRound, RoundOutcome};
pub use token_store::{AuctionToken, TokenStore};
