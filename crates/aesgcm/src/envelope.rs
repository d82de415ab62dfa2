//! Sealed envelope: a nonce and its ciphertext carried as one string.
//!
//! ```text
//! v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! The `v1` prefix leaves room for a future format change without breaking
//! stored values.

use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::error::AeadError;
use crate::NONCE_SIZE;

/// Prefix that appears at the start of every envelope string.
pub const VERSION_PREFIX: &str = "v1";

/// A nonce together with the ciphertext (tag appended) it sealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedEnvelope {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_SIZE],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl SealedEnvelope {
    /// Encode this value to its canonical string representation.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl FromStr for SealedEnvelope {
    type Err = AeadError;

    /// Parse an envelope string.
    ///
    /// Only the structure is checked here; a ciphertext shorter than the tag
    /// is reported by [`crate::Aes256Gcm::open`] as `InputTooShort`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(AeadError::InvalidFormat);
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| AeadError::InvalidFormat)?;
        let nonce: [u8; NONCE_SIZE] = nonce_bytes
            .as_slice()
            .try_into()
            .map_err(|_| AeadError::InvalidFormat)?;

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| AeadError::InvalidFormat)?;

        Ok(Self { nonce, ciphertext })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SealedEnvelope {
        SealedEnvelope {
            nonce: [0xAB; NONCE_SIZE],
            ciphertext: vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17],
        }
    }

    #[test]
    fn string_repr_parses_back() {
        let env = sample();
        let s = env.to_string_repr();
        assert!(s.starts_with("v1."));
        assert_eq!(s.parse::<SealedEnvelope>().unwrap(), env);
    }

    #[test]
    fn trailing_newline_is_ignored() {
        let s = format!("{}\n", sample().to_string_repr());
        assert_eq!(s.parse::<SealedEnvelope>().unwrap(), sample());
    }

    #[test]
    fn rejects_bad_prefix() {
        assert!(matches!(
            "v2.abc.def".parse::<SealedEnvelope>(),
            Err(AeadError::InvalidFormat)
        ));
    }

    #[test]
    fn rejects_too_few_parts() {
        assert!("v1.abc".parse::<SealedEnvelope>().is_err());
    }

    #[test]
    fn rejects_bad_base64() {
        assert!("v1.!!!.abc".parse::<SealedEnvelope>().is_err());
    }

    #[test]
    fn rejects_wrong_nonce_length() {
        let s = format!("v1.{}.AAAA", URL_SAFE_NO_PAD.encode([0u8; NONCE_SIZE - 1]));
        assert!(matches!(
            s.parse::<SealedEnvelope>(),
            Err(AeadError::InvalidFormat)
        ));
    }
}
