//! Time-seeded nonce generation.
//!
//! # Layout
//!
//! ```text
//! | 5 bytes: high-order bytes of Unix time in ns (big-endian) | 7 bytes: CSPRNG |
//! ```
//!
//! The timestamp prefix makes nonces roughly sortable by creation time. It is
//! not relied on for uniqueness: the 56 random bits alone keep the collision
//! probability negligible for any realistic number of nonces per key.

use std::time::{SystemTime, UNIX_EPOCH};

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use tracing::warn;

use crate::error::AeadError;
use crate::NONCE_SIZE;

/// Number of leading nonce bytes taken from the clock.
pub const TIMESTAMP_PREFIX_SIZE: usize = 5;

/// Number of trailing nonce bytes taken from the random source.
pub const RANDOM_SUFFIX_SIZE: usize = NONCE_SIZE - TIMESTAMP_PREFIX_SIZE;

/// A cryptographically secure source of random bytes.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::RandomSourceUnavailable`] if the source cannot
    /// supply bytes.
    fn try_fill(&self, dest: &mut [u8]) -> Result<(), AeadError>;
}

/// Operating-system CSPRNG (`getrandom`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn try_fill(&self, dest: &mut [u8]) -> Result<(), AeadError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| AeadError::RandomSourceUnavailable(e.to_string()))
    }
}

/// Source of wall-clock time in nanoseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Current time in nanoseconds since the Unix epoch.
    fn now_nanos(&self) -> u64;
}

/// [`Clock`] backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> u64 {
        // A clock set before 1970 yields an all-zero prefix; the random
        // suffix still carries uniqueness.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}

/// Produces [`NONCE_SIZE`]-byte nonces from a [`Clock`] and a [`RandomSource`].
///
/// Holds no mutable state, so one generator may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct NonceGenerator<R = OsRandom, C = SystemClock> {
    random: R,
    clock: C,
}

impl<R: RandomSource, C: Clock> NonceGenerator<R, C> {
    /// Create a generator from explicit sources.
    pub fn new(random: R, clock: C) -> Self {
        Self { random, clock }
    }

    /// Generate a fresh nonce.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::RandomSourceUnavailable`] if the random source
    /// fails. No nonce is returned in that case, since uniqueness could not
    /// be guaranteed.
    pub fn generate(&self) -> Result<[u8; NONCE_SIZE], AeadError> {
        let mut nonce = [0u8; NONCE_SIZE];
        let stamp = self.clock.now_nanos().to_be_bytes();
        nonce[..TIMESTAMP_PREFIX_SIZE].copy_from_slice(&stamp[..TIMESTAMP_PREFIX_SIZE]);

        self.random
            .try_fill(&mut nonce[TIMESTAMP_PREFIX_SIZE..])
            .map_err(|e| {
                warn!(error = %e, "nonce generation failed");
                e
            })?;

        Ok(nonce)
    }
}

/// Generate a nonce from the system clock and the OS CSPRNG.
///
/// # Errors
///
/// Returns [`AeadError::RandomSourceUnavailable`] if the OS random source fails.
pub fn generate_nonce() -> Result<[u8; NONCE_SIZE], AeadError> {
    NonceGenerator::<OsRandom, SystemClock>::default().generate()
}
