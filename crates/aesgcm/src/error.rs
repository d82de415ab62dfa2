//! Error type returned by every fallible operation in this crate.

use thiserror::Error;

use crate::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};

/// Errors produced by key construction, sealing, opening and nonce generation.
///
/// Messages carry lengths only. Key bytes, plaintext and nonces never appear
/// in an error.
///
/// Variants map to process exit codes via [`AeadError::exit_code`]:
/// - malformed caller input → 2
/// - [`AeadError::AuthenticationFailure`] → 3
/// - [`AeadError::EncryptionFailure`], [`AeadError::RandomSourceUnavailable`] → 1
#[derive(Debug, Error)]
pub enum AeadError {
    /// The key is not exactly [`KEY_SIZE`] bytes.
    #[error("invalid key size: expected {KEY_SIZE} bytes, got {0}")]
    InvalidKeySize(usize),

    /// The nonce is not exactly [`NONCE_SIZE`] bytes.
    #[error("invalid nonce size: expected {NONCE_SIZE} bytes, got {0}")]
    InvalidNonceSize(usize),

    /// The sealed input is shorter than the authentication tag.
    #[error("input too short: need at least {TAG_SIZE} bytes, got {0}")]
    InputTooShort(usize),

    /// The tag did not verify: wrong key, nonce or associated data, or the
    /// ciphertext was modified.
    #[error("message authentication failed")]
    AuthenticationFailure,

    /// The underlying AEAD primitive refused to encrypt.
    #[error("encryption failure")]
    EncryptionFailure,

    /// The secure random source could not supply bytes.
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// A sealed envelope string does not match `v1.<nonce>.<ciphertext>`.
    #[error("invalid sealed envelope format")]
    InvalidFormat,
}

impl AeadError {
    /// Returns the process exit code a command-line caller should use for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AeadError::InvalidKeySize(_)
            | AeadError::InvalidNonceSize(_)
            | AeadError::InputTooShort(_)
            | AeadError::InvalidFormat => 2,
            AeadError::AuthenticationFailure => 3,
            AeadError::EncryptionFailure | AeadError::RandomSourceUnavailable(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(AeadError::InvalidKeySize(31).exit_code(), 2);
        assert_eq!(AeadError::InvalidNonceSize(13).exit_code(), 2);
        assert_eq!(AeadError::InputTooShort(4).exit_code(), 2);
        assert_eq!(AeadError::InvalidFormat.exit_code(), 2);
        assert_eq!(AeadError::AuthenticationFailure.exit_code(), 3);
        assert_eq!(AeadError::EncryptionFailure.exit_code(), 1);
        assert_eq!(
            AeadError::RandomSourceUnavailable("x".into()).exit_code(),
            1
        );
    }

    #[test]
    fn display_reports_lengths() {
        let e = AeadError::InvalidKeySize(33);
        let msg = e.to_string();
        assert!(msg.contains("32"));
        assert!(msg.contains("33"));
    }
}
