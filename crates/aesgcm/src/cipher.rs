//! AES-256-GCM sealing and opening with caller-supplied nonces.
//!
//! The block cipher, counter mode and GHASH tag are provided by the RustCrypto
//! `aes-gcm` crate. This module adds length validation, typed errors and the
//! envelope helpers.
//!
//! **Never reuse a nonce under the same key.** GCM nonce reuse leaks the XOR
//! of the plaintexts and lets an attacker forge tags.

use aes_gcm::{
    aead::{consts::U12, Aead, AeadInPlace, KeyInit, Payload},
    Aes256Gcm as GcmCore, Nonce, Tag,
};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::envelope::SealedEnvelope;
use crate::error::AeadError;
use crate::key::Key;
use crate::nonce::{Clock, NonceGenerator, RandomSource};
use crate::{NONCE_SIZE, TAG_SIZE};

/// An AES-256-GCM instance bound to one key.
///
/// Holds only the expanded key schedule, which is immutable after
/// construction, so a single instance can seal and open from many threads
/// at once.
#[derive(Clone)]
pub struct Aes256Gcm {
    inner: GcmCore,
}

impl Aes256Gcm {
    /// Build a cipher instance from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::InvalidKeySize`] if `key` is not [`crate::KEY_SIZE`] bytes.
    pub fn new(key: &[u8]) -> Result<Self, AeadError> {
        let key = Key::from_slice(key)?;
        Ok(Self::from_key(&key))
    }

    /// Build a cipher instance from an already validated [`Key`].
    pub fn from_key(key: &Key) -> Self {
        Self {
            inner: GcmCore::new(aes_gcm::Key::<GcmCore>::from_slice(key.as_bytes())),
        }
    }

    /// Encrypt `plaintext` and authenticate it together with `aad`.
    ///
    /// Returns the ciphertext with the 16-byte tag appended. The output is a
    /// pure function of the key and the three inputs.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::InvalidNonceSize`] if `nonce` is not [`NONCE_SIZE`] bytes.
    /// Returns [`AeadError::EncryptionFailure`] if the primitive rejects the
    /// input (plaintext beyond the GCM length limit).
    pub fn seal(&self, plaintext: &[u8], aad: &[u8], nonce: &[u8]) -> Result<Vec<u8>, AeadError> {
        let nonce = nonce_from_slice(nonce)?;
        let sealed = self
            .inner
            .encrypt(
                nonce,
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| AeadError::EncryptionFailure)?;

        debug!(
            plaintext_len = plaintext.len(),
            aad_len = aad.len(),
            sealed_len = sealed.len(),
            "sealed message"
        );
        Ok(sealed)
    }

    /// Verify and decrypt a ciphertext produced by [`Aes256Gcm::seal`].
    ///
    /// The trailing [`TAG_SIZE`] bytes are compared in constant time against
    /// the tag recomputed over the ciphertext body and `aad`. Plaintext is
    /// only returned when they match.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::InvalidNonceSize`] if `nonce` is not [`NONCE_SIZE`] bytes.
    /// Returns [`AeadError::InputTooShort`] if `ciphertext` is shorter than the tag.
    /// Returns [`AeadError::AuthenticationFailure`] if the tag does not verify.
    pub fn open(&self, ciphertext: &[u8], aad: &[u8], nonce: &[u8]) -> Result<Vec<u8>, AeadError> {
        let nonce = nonce_from_slice(nonce)?;
        if ciphertext.len() < TAG_SIZE {
            return Err(AeadError::InputTooShort(ciphertext.len()));
        }

        let (body, tag) = ciphertext.split_at(ciphertext.len() - TAG_SIZE);
        let mut buffer = body.to_vec();
        if self
            .inner
            .decrypt_in_place_detached(nonce, aad, &mut buffer, Tag::from_slice(tag))
            .is_err()
        {
            buffer.zeroize();
            warn!(
                sealed_len = ciphertext.len(),
                aad_len = aad.len(),
                "message authentication failed"
            );
            return Err(AeadError::AuthenticationFailure);
        }

        debug!(
            plaintext_len = buffer.len(),
            aad_len = aad.len(),
            "opened message"
        );
        Ok(buffer)
    }

    /// Seal `plaintext` under a nonce drawn from `nonces`, returning both
    /// together as a [`SealedEnvelope`].
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::RandomSourceUnavailable`] if no nonce could be
    /// generated, or any error from [`Aes256Gcm::seal`].
    pub fn seal_envelope<R: RandomSource, C: Clock>(
        &self,
        plaintext: &[u8],
        aad: &[u8],
        nonces: &NonceGenerator<R, C>,
    ) -> Result<SealedEnvelope, AeadError> {
        let nonce = nonces.generate()?;
        let ciphertext = self.seal(plaintext, aad, &nonce)?;
        Ok(SealedEnvelope { nonce, ciphertext })
    }

    /// Open a [`SealedEnvelope`] using the nonce it carries.
    ///
    /// # Errors
    ///
    /// Same as [`Aes256Gcm::open`].
    pub fn open_envelope(
        &self,
        envelope: &SealedEnvelope,
        aad: &[u8],
    ) -> Result<Vec<u8>, AeadError> {
        self.open(&envelope.ciphertext, aad, &envelope.nonce)
    }
}

impl std::fmt::Debug for Aes256Gcm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aes256Gcm").finish_non_exhaustive()
    }
}

fn nonce_from_slice(nonce: &[u8]) -> Result<&Nonce<U12>, AeadError> {
    if nonce.len() != NONCE_SIZE {
        return Err(AeadError::InvalidNonceSize(nonce.len()));
    }
    Ok(Nonce::from_slice(nonce))
}
