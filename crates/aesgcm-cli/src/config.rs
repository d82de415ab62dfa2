//! Configuration loading and validation for the `aesgcm` binary.
//!
//! All values are read from environment variables at startup.

use aesgcm::Key;
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

/// Validated `aesgcm` configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64 (standard alphabet) encoded 32-byte key. Required by `seal` and `open`.
    #[serde(default)]
    pub aesgcm_key: Option<String>,

    /// Associated data bound to every sealed message, as UTF-8.
    #[serde(default)]
    pub aesgcm_aad: String,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("aesgcm_key", &self.aesgcm_key.as_ref().map(|_| "[REDACTED]"))
            .field("aesgcm_aad_len", &self.aesgcm_aad.len())
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build aesgcm configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise aesgcm configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        if self.aesgcm_key.is_some() {
            self.key()?;
        }
        Ok(())
    }

    /// Decode `AESGCM_KEY` into a [`Key`].
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset, is not valid base64, or does
    /// not decode to exactly 32 bytes.
    pub fn key(&self) -> Result<Key> {
        let encoded = self
            .aesgcm_key
            .as_deref()
            .context("AESGCM_KEY is required for this command")?;
        let raw = STANDARD
            .decode(encoded.trim())
            .context("AESGCM_KEY must be standard base64")?;
        Ok(Key::from_slice(&raw)?)
    }

    /// Associated data as bytes.
    pub fn aad(&self) -> &[u8] {
        self.aesgcm_aad.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aesgcm::{AeadError, KEY_SIZE};

    fn cfg(key: Option<String>) -> Config {
        Config {
            aesgcm_key: key,
            aesgcm_aad: String::new(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_missing_key() {
        assert!(cfg(None).validate().is_ok());
        assert!(cfg(None).key().is_err());
    }

    #[test]
    fn validate_accepts_valid_key() {
        let c = cfg(Some(STANDARD.encode([7u8; KEY_SIZE])));
        assert!(c.validate().is_ok());
        assert_eq!(c.key().unwrap().as_bytes(), &[7u8; KEY_SIZE]);
    }

    #[test]
    fn validate_rejects_short_key() {
        let c = cfg(Some(STANDARD.encode([7u8; KEY_SIZE - 1])));
        let err = c.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AeadError>(),
            Some(AeadError::InvalidKeySize(31))
        ));
    }

    #[test]
    fn validate_rejects_non_base64_key() {
        assert!(cfg(Some("not base64!".into())).validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_log_level() {
        let mut c = cfg(None);
        c.log_level = "  ".into();
        assert!(c.validate().is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let c = cfg(Some(STANDARD.encode([7u8; KEY_SIZE])));
        let printed = format!("{c:?}");
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains(&STANDARD.encode([7u8; KEY_SIZE])));
    }
}
