//! Enclave key pair holder.
//!
//! The RSA private key is generated inside the enclave from the OS CSPRNG
//! and never leaves it. The public key is exported (PEM / DER) for the
//! external distribution channel that hands it to bidders.

use std::fmt;

use rand::rngs::OsRng;
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs8::{EncodePublicKey, LineEnding},
};
use sealbid_types::{EnclaveConfig, EncryptedPrice, Result, SealbidError, constants};
use sha2::{Digest, Sha256};

use crate::crypto::decrypt_hybrid;

/// Holds the enclave's RSA key pair.
pub struct KeyManager {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl KeyManager {
    /// Generate a fresh RSA-2048 key pair.
    pub fn generate() -> Result<Self> {
        Self::generate_with_bits(constants::DEFAULT_RSA_KEY_BITS)
    }

    /// Generate a key pair sized per the enclave configuration.
    pub fn from_config(config: &EnclaveConfig) -> Result<Self> {
        config.validate()?;
        Self::generate_with_bits(config.rsa_key_bits)
    }

    /// Generate a key pair with an explicit modulus size.
    ///
    /// # Errors
    /// Returns `KeyGeneration` if `bits` is below the minimum or the RSA
    /// generator fails.
    pub fn generate_with_bits(bits: usize) -> Result<Self> {
        if bits < constants::MIN_RSA_KEY_BITS {
            return Err(SealbidError::KeyGeneration {
                detail: format!("{bits}-bit modulus below minimum {}", constants::MIN_RSA_KEY_BITS),
            });
        }
        let private_key =
            RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| SealbidError::KeyGeneration {
                detail: e.to_string(),
            })?;
        let manager = Self::from_private_key(private_key);
        tracing::info!(
            bits,
            fingerprint = %manager.fingerprint(),
            "Enclave key pair generated"
        );
        Ok(manager)
    }

    /// Wrap an existing private key.
    #[must_use]
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        let public_key = RsaPublicKey::from(&private_key);
        Self {
            private_key,
            public_key,
        }
    }

    #[must_use]
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    #[must_use]
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// SPKI DER encoding of the public key.
    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        self.public_key
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| SealbidError::KeyEncoding {
                detail: e.to_string(),
            })
    }

    /// SPKI PEM encoding of the public key.
    pub fn public_key_pem(&self) -> Result<String> {
        self.public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| SealbidError::KeyEncoding {
                detail: e.to_string(),
            })
    }

    /// Hex SHA-256 over the public key's DER encoding.
    ///
    /// Falls back to an empty string if encoding fails, so it is safe to use
    /// in log fields.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.public_key_der()
            .map(|der| hex::encode(Sha256::digest(der)))
            .unwrap_or_default()
    }

    /// Open an encrypted price with this enclave's private key.
    pub fn decrypt(&self, encrypted: &EncryptedPrice) -> Result<Vec<u8>> {
        decrypt_hybrid(encrypted, &self.private_key)
    }
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rsa::{pkcs8::DecodePublicKey, traits::PublicKeyParts};

    use super::*;
    use crate::{
        crypto::encrypt_hybrid,
        test_keys::{other_keys, shared_keys},
    };

    #[test]
    fn generated_key_is_2048_bits() {
        assert_eq!(shared_keys().public_key().size() * 8, 2048);
    }

    #[test]
    fn undersized_key_rejected() {
        let err = KeyManager::generate_with_bits(1024).unwrap_err();
        assert!(matches!(err, SealbidError::KeyGeneration { .. }));
    }

    #[test]
    fn invalid_config_rejected_before_generation() {
        let config = EnclaveConfig {
            rsa_key_bits: 512,
            ..EnclaveConfig::default()
        };
        let err = KeyManager::from_config(&config).unwrap_err();
        assert!(matches!(err, SealbidError::Configuration(_)));
    }

    #[test]
    fn pem_roundtrips_to_same_key() {
        let km = shared_keys();
        let pem = km.public_key_pem().unwrap();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
        let parsed = RsaPublicKey::from_public_key_pem(&pem).unwrap();
        assert_eq!(&parsed, km.public_key());
    }

    #[test]
    fn fingerprints_differ_between_keys() {
        let a = shared_keys().fingerprint();
        let b = other_keys().fingerprint();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let dbg = format!("{:?}", shared_keys());
        assert!(dbg.contains("fingerprint"));
        assert!(!dbg.contains("primes"));
    }

    #[test]
    fn decrypt_uses_own_private_key() {
        let km = shared_keys();
        let sealed = encrypt_hybrid(b"payload", km.public_key()).unwrap();
        assert_eq!(km.decrypt(&sealed).unwrap(), b"payload");
        assert!(other_keys().decrypt(&sealed).is_err());
    }
}
