//! Subcommands: `seal`, `open` and `nonce`.

use std::str::FromStr;

use aesgcm::{Aes256Gcm, NonceGenerator, SealedEnvelope};
use anyhow::{Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tracing::info;

use crate::config::Config;

/// Usage line printed when no valid subcommand is given.
pub const USAGE: &str = "usage: aesgcm <seal|open|nonce>  (input on stdin, output on stdout)";

/// Subcommand selected by the first command-line argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Read plaintext, write a `v1.<nonce>.<ciphertext>` envelope line.
    Seal,
    /// Read an envelope, write the plaintext.
    Open,
    /// Write a freshly generated base64url nonce line.
    Nonce,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "seal" => Ok(Command::Seal),
            "open" => Ok(Command::Open),
            "nonce" => Ok(Command::Nonce),
            other => anyhow::bail!("unknown command `{other}`\n{USAGE}"),
        }
    }
}

impl Command {
    /// Whether the command reads stdin.
    pub fn reads_input(self) -> bool {
        !matches!(self, Command::Nonce)
    }

    /// Run the command against `input`, returning the bytes to write to stdout.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`aesgcm::AeadError`] (wrapped with context) on
    /// any cryptographic failure, or a configuration error if the key is
    /// missing.
    pub fn execute(self, cfg: &Config, input: &[u8]) -> Result<Vec<u8>> {
        let nonces: NonceGenerator = NonceGenerator::default();
        match self {
            Command::Seal => {
                let gcm = Aes256Gcm::from_key(&cfg.key()?);
                let envelope = gcm
                    .seal_envelope(input, cfg.aad(), &nonces)
                    .context("seal failed")?;
                info!(plaintext_len = input.len(), "sealed stdin");
                Ok(format!("{}\n", envelope.to_string_repr()).into_bytes())
            }
            Command::Open => {
                let gcm = Aes256Gcm::from_key(&cfg.key()?);
                let text = std::str::from_utf8(input)
                    .map_err(|_| aesgcm::AeadError::InvalidFormat)
                    .context("envelope must be UTF-8")?;
                let envelope: SealedEnvelope =
                    text.parse().context("envelope could not be parsed")?;
                let plaintext = gcm
                    .open_envelope(&envelope, cfg.aad())
                    .context("open failed")?;
                info!(plaintext_len = plaintext.len(), "opened stdin");
                Ok(plaintext)
            }
            Command::Nonce => {
                let nonce = nonces.generate().context("nonce generation failed")?;
                Ok(format!("{}\n", URL_SAFE_NO_PAD.encode(nonce)).into_bytes())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aesgcm::{AeadError, KEY_SIZE, NONCE_SIZE};
    use base64::engine::general_purpose::STANDARD;

    fn cfg(aad: &str) -> Config {
        Config {
            aesgcm_key: Some(STANDARD.encode([0x24u8; KEY_SIZE])),
            aesgcm_aad: aad.into(),
            log_level: "info".into(),
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!("seal".parse::<Command>().unwrap(), Command::Seal);
        assert_eq!("open".parse::<Command>().unwrap(), Command::Open);
        assert_eq!("nonce".parse::<Command>().unwrap(), Command::Nonce);
        assert!("encrypt".parse::<Command>().is_err());
    }

    #[test]
    fn seal_then_open() {
        let c = cfg("record-42");
        let sealed = Command::Seal.execute(&c, b"123-45-6789").unwrap();
        assert!(sealed.starts_with(b"v1."));
        let opened = Command::Open.execute(&c, &sealed).unwrap();
        assert_eq!(opened, b"123-45-6789");
    }

    #[test]
    fn open_with_wrong_aad_fails_auth() {
        let sealed = Command::Seal.execute(&cfg("a"), b"secret").unwrap();
        let err = Command::Open.execute(&cfg("b"), &sealed).unwrap_err();
        let code = err.downcast_ref::<AeadError>().map(AeadError::exit_code);
        assert_eq!(code, Some(3));
    }

    #[test]
    fn open_rejects_garbage() {
        let err = Command::Open.execute(&cfg(""), b"not an envelope").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AeadError>(),
            Some(AeadError::InvalidFormat)
        ));
    }

    #[test]
    fn seal_requires_key() {
        let mut c = cfg("");
        c.aesgcm_key = None;
        assert!(Command::Seal.execute(&c, b"x").is_err());
    }

    #[test]
    fn nonce_output_decodes_to_nonce_size() {
        let out = Command::Nonce.execute(&cfg(""), b"").unwrap();
        let line = std::str::from_utf8(&out).unwrap().trim_end();
        assert_eq!(URL_SAFE_NO_PAD.decode(line).unwrap().len(), NONCE_SIZE);
    }
}
