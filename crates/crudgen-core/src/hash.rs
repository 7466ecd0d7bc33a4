//! Content digests for generated blocks.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::CoreError;

const PREFIX: &str = "sha256:";
const HEX_LEN: usize = 64;

/// SHA-256 digest of a generated block body, rendered as `sha256:<hex>`.
///
/// This is the value persisted in the ledger, so the rendering is part of the
/// on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Digest the given text.
    #[must_use]
    pub fn of(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        Self(format!("{PREFIX}{digest:x}"))
    }

    /// Parse a previously rendered digest.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let valid = value.strip_prefix(PREFIX).is_some_and(|hex| {
            hex.len() == HEX_LEN
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        });
        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(CoreError::InvalidHash {
                value: value.to_string(),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex chars, for log lines.
    #[must_use]
    pub fn short(&self) -> &str {
        let end = (PREFIX.len() + 12).min(self.0.len());
        &self.0[PREFIX.len()..end]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentHash {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ContentHash> for String {
    fn from(value: ContentHash) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn digest_is_stable_and_prefixed() {
        let hash = ContentHash::of("abc");
        assert_eq!(
            hash.as_str(),
            "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash, ContentHash::of("abc"));
        assert_eq!(hash.short(), "ba7816bf8f01");
    }

    #[test]
    fn different_text_gives_different_digest() {
        assert_ne!(ContentHash::of("a"), ContentHash::of("b"));
    }

    #[test]
    fn parse_accepts_rendered_digest() {
        let hash = ContentHash::of("user block");
        let parsed = ContentHash::parse(hash.as_str()).expect("rendered digest should parse");
        assert_eq!(parsed, hash);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ContentHash::parse("md5:abc").is_err());
        assert!(ContentHash::parse("sha256:xyz").is_err());
        assert!(ContentHash::parse(&format!("sha256:{}", "A".repeat(64))).is_err());
    }

    #[test]
    fn serde_uses_plain_string() {
        let hash = ContentHash::of("abc");
        let json = serde_json::to_string(&hash).expect("serialize");
        assert_eq!(json, format!("\"{hash}\""));
        let back: ContentHash = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, hash);
        assert!(serde_json::from_str::<ContentHash>("\"nope\"").is_err());
    }
}
