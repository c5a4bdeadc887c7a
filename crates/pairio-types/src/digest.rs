use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Hex-encoded SHA-1 digest used as a storage address.
///
/// Local entries are sharded on the first four characters of their digest;
/// remote entries are addressed by the digest string directly.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Raw digest width in bytes.
    pub const BYTES: usize = 20;

    /// Rendered digest width in hex characters.
    pub const HEX_LEN: usize = Self::BYTES * 2;

    /// Build a digest from raw hash output.
    pub fn from_bytes(bytes: [u8; Self::BYTES]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse from a hex string. Uppercase input is normalized.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != Self::BYTES {
            return Err(TypeError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }
        Ok(Self(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Outer and inner shard directory names (`digest[0:2]`, `digest[2:4]`).
    pub fn shards(&self) -> (&str, &str) {
        (&self.0[0..2], &self.0[2..4])
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.0[..8])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Digest {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Digest> for String {
    fn from(d: Digest) -> Self {
        d.0
    }
}
