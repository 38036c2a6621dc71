//! Hybrid encryption: RSA-OAEP-SHA256 key wrapping + AES-256-GCM payload.
//!
//! Bidders seal a short JSON payload with a fresh AES-256 key, then wrap
//! that key under the enclave's RSA public key. Only the enclave can unwrap
//! the key, and GCM authentication rejects any tampering before a price
//! reaches the ranker.
//!
//! ```text
//! encrypt_hybrid(plaintext, pub)  -> EncryptedPrice { aes_key_encrypted, encrypted_payload, nonce }
//! decrypt_hybrid(encrypted, priv) -> plaintext
//! ```
//!
//! All wire fields are standard, padded base64. The symmetric key is
//! zeroized as soon as the cipher has been built.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::{RngCore, rngs::OsRng};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sealbid_types::{EncryptedPrice, Result, SealbidError, constants};
use sha2::Sha256;
use zeroize::Zeroizing;

/// Seal `plaintext` to `public_key`.
///
/// Generates a fresh AES-256 key and a fresh 96-bit nonce from the OS CSPRNG
/// on every call, so nonces are never reused under a key.
///
/// # Errors
/// - `Encryption` if AES-GCM sealing fails
/// - `Encryption` if RSA-OAEP wrapping of the AES key fails
pub fn encrypt_hybrid(plaintext: &[u8], public_key: &RsaPublicKey) -> Result<EncryptedPrice> {
    let mut aes_key = Zeroizing::new([0u8; constants::AES_KEY_LEN]);
    OsRng.fill_bytes(&mut aes_key[..]);

    let mut nonce = [0u8; constants::GCM_NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let cipher = Aes256Gcm::new_from_slice(&aes_key[..]).map_err(|e| {
        SealbidError::Encryption {
            detail: e.to_string(),
        }
    })?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| SealbidError::Encryption {
            detail: "AES-GCM seal failed".to_string(),
        })?;

    let wrapped_key = public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), &aes_key[..])
        .map_err(|e| SealbidError::Encryption {
            detail: format!("RSA-OAEP wrap failed: {e}"),
        })?;

    Ok(EncryptedPrice {
        aes_key_encrypted: STANDARD.encode(wrapped_key),
        encrypted_payload: STANDARD.encode(ciphertext),
        nonce: STANDARD.encode(nonce),
    })
}

/// Open an [`EncryptedPrice`] with the enclave's private key.
///
/// Steps, each with its own failure:
/// 1. Base64-decode all three fields (`Decode`, naming the field)
/// 2. Unwrap the AES key with RSA-OAEP-SHA256 (`KeyUnwrap`)
/// 3. Check the key is 32 bytes (`BadKeyLength`)
/// 4. Check the nonce is 12 bytes (`BadNonceLength`)
/// 5. Decrypt and authenticate (`Authentication`)
pub fn decrypt_hybrid(encrypted: &EncryptedPrice, private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let wrapped_key = decode_field("aes_key_encrypted", &encrypted.aes_key_encrypted)?;
    let ciphertext = decode_field("encrypted_payload", &encrypted.encrypted_payload)?;
    let nonce = decode_field("nonce", &encrypted.nonce)?;

    // OAEP failures are collapsed into one variant: no padding oracle.
    let aes_key = Zeroizing::new(
        private_key
            .decrypt(Oaep::new::<Sha256>(), &wrapped_key)
            .map_err(|_| SealbidError::KeyUnwrap)?,
    );

    if aes_key.len() != constants::AES_KEY_LEN {
        return Err(SealbidError::BadKeyLength {
            expected: constants::AES_KEY_LEN,
            actual: aes_key.len(),
        });
    }

    let cipher =
        Aes256Gcm::new_from_slice(aes_key.as_slice()).map_err(|_| SealbidError::BadKeyLength {
            expected: constants::AES_KEY_LEN,
            actual: aes_key.len(),
        })?;

    if nonce.len() != constants::GCM_NONCE_LEN {
        return Err(SealbidError::BadNonceLength {
            expected: constants::GCM_NONCE_LEN,
            actual: nonce.len(),
        });
    }

    cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| SealbidError::Authentication)
}

fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>> {
    STANDARD.decode(value).map_err(|e| SealbidError::Decode {
        field,
        detail: e.to_string(),
    })
}
