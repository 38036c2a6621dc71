//! Shared key pairs for unit tests. RSA generation is slow in debug builds,
//! so each key is generated once per test binary.

use std::sync::{Arc, OnceLock};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use sealbid_types::{DecryptedPayload, EncryptedPrice, TokenId};

use crate::{crypto::encrypt_hybrid, key_manager::KeyManager};

static SHARED: OnceLock<Arc<KeyManager>> = OnceLock::new();
static OTHER: OnceLock<KeyManager> = OnceLock::new();

pub fn shared_keys_arc() -> Arc<KeyManager> {
    Arc::clone(SHARED.get_or_init(|| Arc::new(KeyManager::generate().unwrap())))
}

pub fn shared_keys() -> &'static KeyManager {
    SHARED.get_or_init(|| Arc::new(KeyManager::generate().unwrap()))
}

pub fn other_keys() -> &'static KeyManager {
    OTHER.get_or_init(|| KeyManager::generate().unwrap())
}

/// Seal a price (and optional token) to `km`, as a bidder would.
pub fn seal_price(km: &KeyManager, price: Decimal, token: Option<&str>) -> EncryptedPrice {
    let payload = DecryptedPayload {
        price: price.to_f64().unwrap(),
        auction_token: token.map(TokenId::new),
    };
    let json = serde_json::to_vec(&payload).unwrap();
    encrypt_hybrid(&json, km.public_key()).unwrap()
}
