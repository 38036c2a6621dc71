//! Single-use auction tokens for bid replay protection.
//!
//! Tokens are issued to bidders in one round and echoed back inside their
//! encrypted payloads later. A token may authorize at most one accepted
//! action: once consumed it can never validate again.
//!
//! ## Concurrency
//!
//! Backed by a sharded [`DashMap`]. Reads take a shard read lock only;
//! writes contend per shard, never on a store-wide lock, so unrelated
//! auctions consuming unrelated tokens do not serialize on each other.
//!
//! [`TokenStore::validate_and_consume`] is a single `remove` call: among N
//! racing callers for the same token exactly one observes the entry.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::{RngCore, rngs::OsRng};
use sealbid_types::{Result, SealbidError, TokenCleanupConfig, TokenId, constants};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

/// A live token and when it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionToken {
    pub id: TokenId,
    pub created_at: DateTime<Utc>,
}

/// Process-wide registry of unconsumed auction tokens.
#[derive(Debug, Default)]
pub struct TokenStore {
    /// Token ID → issue time.
    tokens: DashMap<TokenId, DateTime<Utc>>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token.
    ///
    /// The ID is 256 bits from the OS CSPRNG (which inside a Nitro enclave is
    /// fed by the NSM hardware RNG), so collisions are not a practical concern.
    pub fn issue(&self) -> TokenId {
        let mut entropy = [0u8; constants::TOKEN_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut entropy);
        let id = TokenId::from_entropy(&entropy);
        self.tokens.insert(id.clone(), Utc::now());
        tracing::debug!(token = %id, "Auction token issued");
        id
    }

    /// Whether the token is live. May be momentarily stale while a
    /// concurrent consume is in flight; use
    /// [`validate_and_consume`](Self::validate_and_consume) for decisions.
    #[must_use]
    pub fn exists(&self, id: &TokenId) -> bool {
        if id.is_empty() {
            return false;
        }
        self.tokens.contains_key(id)
    }

    /// Look up a live token.
    #[must_use]
    pub fn get(&self, id: &TokenId) -> Option<AuctionToken> {
        self.tokens.get(id).map(|entry| AuctionToken {
            id: entry.key().clone(),
            created_at: *entry.value(),
        })
    }

    /// Atomically check and remove a token.
    ///
    /// Returns `true` iff the token existed and this call removed it.
    pub fn validate_and_consume(&self, id: &TokenId) -> bool {
        if id.is_empty() {
            return false;
        }
        self.tokens.remove(id).is_some()
    }

    /// Remove a token. No-op if absent.
    pub fn consume(&self, id: &TokenId) {
        self.tokens.remove(id);
    }

    /// Remove a batch of tokens. Absent IDs are ignored.
    pub fn consume_all<'a>(&self, ids: impl IntoIterator<Item = &'a TokenId>) {
        for id in ids {
            self.tokens.remove(id);
        }
    }

    /// Remove every token older than `max_age`. Returns how many were removed.
    ///
    /// Shards are visited one at a time, so issuance and consumption keep
    /// running on other shards. Tokens inserted mid-sweep may or may not be
    /// visited; each removed entry is counted exactly once.
    pub fn expire_older_than(&self, max_age: Duration) -> usize {
        // An age beyond chrono's range means nothing can be that old.
        let Ok(max_age) = chrono::Duration::from_std(max_age) else {
            return 0;
        };
        let now = Utc::now();
        let mut removed = 0;
        self.tokens.retain(|_, created_at| {
            let keep = now.signed_duration_since(*created_at) <= max_age;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Spawn the expiration sweep with the configured cleanup policy.
    ///
    /// # Errors
    /// Returns `Configuration` if the policy is invalid.
    pub fn spawn_cleanup(
        self: &Arc<Self>,
        config: &TokenCleanupConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Result<JoinHandle<()>> {
        if config.max_age.is_zero() {
            return Err(SealbidError::Configuration(
                "token max_age must be non-zero".to_string(),
            ));
        }
        self.spawn_expiration(config.sweep_interval, config.max_age, shutdown)
    }

    /// Spawn the periodic expiration sweep on the current tokio runtime.
    ///
    /// The task runs [`expire_older_than`](Self::expire_older_than) every
    /// `interval` and exits as soon as `shutdown` flips to `true` or its
    /// sender is dropped. Await the returned handle to observe termination.
    ///
    /// # Errors
    /// Returns `Configuration` if `interval` is zero.
    pub fn spawn_expiration(
        self: &Arc<Self>,
        interval: Duration,
        max_age: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<JoinHandle<()>> {
        if interval.is_zero() {
            return Err(SealbidError::Configuration(
                "token sweep interval must be non-zero".to_string(),
            ));
        }

        let store = Arc::clone(self);
        Ok(tokio::spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                if *shutdown.borrow_and_update() {
                    break;
                }
                tokio::select! {
                    biased;
                    changed = shutdown.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        let removed = store.expire_older_than(max_age);
                        if removed > 0 {
                            tracing::info!(
                                removed,
                                remaining = store.count(),
                                "Token cleanup: removed expired tokens"
                            );
                        }
                    }
                }
            }
            tracing::info!("Token cleanup: stopping on shutdown signal");
        }))
    }

    /// Number of live tokens (monitoring path).
    #[must_use]
    pub fn count(&self) -> usize {
        self.tokens.len()
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl TokenStore {
    /// Insert a token with an explicit issue time.
    pub fn insert_at(&self, id: TokenId, created_at: DateTime<Utc>) {
        self.tokens.insert(id, created_at);
    }
}
