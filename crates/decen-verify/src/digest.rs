use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ParseDigestError, Result};
use crate::hasher::{Hasher, Sha256Hasher};

static DIGEST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-fA-F0-9]{64}$").expect("digest pattern is valid"));

/// Canonical content identifier: 64 lowercase hex characters of a SHA-256.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Resolve arbitrary user input to a digest.
    ///
    /// Input that already looks like a digest is taken as-is (lowercased);
    /// anything else is hashed. Never fails, including for empty input.
    pub fn resolve(input: &str) -> Self {
        if is_digest(input) {
            Self(input.to_ascii_lowercase())
        } else {
            Self::of_bytes(input.as_bytes())
        }
    }

    /// Digest of raw content bytes.
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256Hasher::new();
        hasher.update(data);
        Self(hex::encode(hasher.finalize()))
    }

    /// Strict parse: the input must already be a digest.
    pub fn parse(input: &str) -> Result<Self> {
        if let Some(bad) = input.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseDigestError::NonHex(bad));
        }
        if input.len() != 64 {
            return Err(ParseDigestError::Length(input.len()));
        }
        Ok(Self(input.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

/// Whether `input` is 64 hex characters, in either case.
pub fn is_digest(input: &str) -> bool { DIGEST_PATTERN.is_match(input) }

/// Shorthand for [`Digest::resolve`].
pub fn resolve(input: &str) -> Digest { Digest::resolve(input) }

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str { &self.0 }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for Digest {
    type Error = ParseDigestError;

    fn try_from(value: String) -> Result<Self> { Self::parse(&value) }
}

impl From<Digest> for String {
    fn from(value: Digest) -> Self { value.0 }
}
