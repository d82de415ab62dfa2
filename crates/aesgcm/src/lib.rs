//! AES-256-GCM authenticated encryption with associated data.
//!
//! ```
//! use aesgcm::{generate_nonce, Aes256Gcm};
//!
//! let nonce = generate_nonce()?;
//! let gcm = Aes256Gcm::new(b"Super Duper Secret Actually Not!")?;
//!
//! let sealed = gcm.seal(b"encrypted and authenticated", b"authenticated only", &nonce)?;
//! let opened = gcm.open(&sealed, b"authenticated only", &nonce)?;
//! assert_eq!(opened, b"encrypted and authenticated");
//! # Ok::<(), aesgcm::AeadError>(())
//! ```

pub mod cipher;
pub mod envelope;
pub mod error;
pub mod key;
pub mod nonce;

pub use cipher::Aes256Gcm;
pub use envelope::SealedEnvelope;
pub use error::AeadError;
pub use key::Key;
pub use nonce::{generate_nonce, Clock, NonceGenerator, OsRandom, RandomSource, SystemClock};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_SIZE: usize = 32;

/// Byte length of a GCM nonce (12 bytes = 96 bits).
pub const NONCE_SIZE: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_SIZE: usize = 16;
