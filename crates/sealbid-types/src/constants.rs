//! System-wide constants for the SealBid enclave.

/// AES-256 key length in bytes.
pub const AES_KEY_LEN: usize = 32;

/// AES-GCM standard nonce length in bytes (96 bits).
pub const GCM_NONCE_LEN: usize = 12;

/// RSA modulus size for the enclave key pair.
pub const DEFAULT_RSA_KEY_BITS: usize = 2048;

/// Smallest RSA modulus the enclave accepts in configuration.
pub const MIN_RSA_KEY_BITS: usize = 2048;

/// Random bytes per issued auction token (256 bits).
pub const TOKEN_ENTROPY_BYTES: usize = 32;

/// Default interval between background token sweeps, in seconds.
pub const DEFAULT_TOKEN_SWEEP_INTERVAL_SECS: u64 = 60;

/// Default maximum age of an unconsumed auction token, in seconds.
pub const DEFAULT_TOKEN_MAX_AGE_SECS: u64 = 600;

