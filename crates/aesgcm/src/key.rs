//! [`Key`]: owned, zeroize-on-drop buffer for a 256-bit key.

use zeroize::Zeroizing;

use crate::error::AeadError;
use crate::KEY_SIZE;

/// Fixed-size key buffer that holds exactly [`KEY_SIZE`] bytes.
///
/// The bytes are wiped when the value is dropped so that a copied key does
/// not outlive its owner in memory.
#[derive(Clone)]
pub struct Key(Zeroizing<[u8; KEY_SIZE]>);

impl Key {
    /// Copy `bytes` into a new key buffer.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::InvalidKeySize`] if the slice is not [`KEY_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AeadError> {
        if bytes.len() != KEY_SIZE {
            return Err(AeadError::InvalidKeySize(bytes.len()));
        }
        let mut buf = Zeroizing::new([0u8; KEY_SIZE]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl From<[u8; KEY_SIZE]> for Key {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self(Zeroizing::new(bytes))
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("Key([REDACTED])")
    }
}
