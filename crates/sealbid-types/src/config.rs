//! Configuration for the enclave's bid pipeline and token cleanup.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Result, SealbidError, constants};

/// Runtime configuration for one enclave process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclaveConfig {
    /// RSA modulus size for the enclave key pair.
    pub rsa_key_bits: usize,
    /// Cleanup policy for unconsumed auction tokens.
    pub tokens: TokenCleanupConfig,
}

/// Background expiration policy for the token store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCleanupConfig {
    /// How often the sweep runs.
    pub sweep_interval: Duration,
    /// Tokens older than this are removed by the sweep.
    pub max_age: Duration,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(constants::DEFAULT_TOKEN_SWEEP_INTERVAL_SECS),
            max_age: Duration::from_secs(constants::DEFAULT_TOKEN_MAX_AGE_SECS),
        }
    }
}

impl Default for EnclaveConfig {
    fn default() -> Self {
        Self {
            rsa_key_bits: constants::DEFAULT_RSA_KEY_BITS,
            tokens: TokenCleanupConfig::default(),
        }
    }
}

impl EnclaveConfig {
    /// Reject values the enclave cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.rsa_key_bits < constants::MIN_RSA_KEY_BITS {
            return Err(SealbidError::Configuration(format!(
                "rsa_key_bits {} below minimum {}",
                self.rsa_key_bits,
                constants::MIN_RSA_KEY_BITS
            )));
        }
        if self.tokens.sweep_interval.is_zero() {
            return Err(SealbidError::Configuration(
                "token sweep_interval must be non-zero".to_string(),
            ));
        }
        if self.tokens.max_age.is_zero() {
            return Err(SealbidError::Configuration(
                "token max_age must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
