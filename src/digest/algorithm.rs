use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::digest::hasher::{Blake3Hasher, DigestHasher, Hasher};
use crate::error::UsageError;

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Blake3,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 9] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Sha512_224,
        DigestAlgorithm::Sha512_256,
        DigestAlgorithm::Blake3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha224 => "sha224",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
            DigestAlgorithm::Sha512_224 => "sha512_224",
            DigestAlgorithm::Sha512_256 => "sha512_256",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|algorithm| algorithm.name()).collect()
    }

    /// Names in rows of five, for help text
    pub fn formatted_list() -> String {
        Self::names()
            .chunks(5)
            .map(|row| row.join(", "))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A fresh hasher for this algorithm
    pub fn hasher(self) -> Box<dyn Hasher> {
        match self {
            DigestAlgorithm::Md5 => Box::new(DigestHasher::<md5::Md5>::new()),
            DigestAlgorithm::Sha1 => Box::new(DigestHasher::<sha1::Sha1>::new()),
            DigestAlgorithm::Sha224 => Box::new(DigestHasher::<sha2::Sha224>::new()),
            DigestAlgorithm::Sha256 => Box::new(DigestHasher::<sha2::Sha256>::new()),
            DigestAlgorithm::Sha384 => Box::new(DigestHasher::<sha2::Sha384>::new()),
            DigestAlgorithm::Sha512 => Box::new(DigestHasher::<sha2::Sha512>::new()),
            DigestAlgorithm::Sha512_224 => Box::new(DigestHasher::<sha2::Sha512_224>::new()),
            DigestAlgorithm::Sha512_256 => Box::new(DigestHasher::<sha2::Sha512_256>::new()),
            DigestAlgorithm::Blake3 => Box::new(Blake3Hasher::new()),
        }
    }

    /// Hex digest of an in-memory buffer
    pub fn hex_digest(self, data: &[u8]) -> String {
        let mut hasher = self.hasher();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }
}

/// Lowercase with `-` and `_` removed, so `SHA-256`, `sha_256` and `sha256` agree
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for DigestAlgorithm {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|algorithm| normalize(algorithm.name()) == wanted)
            .ok_or_else(|| UsageError::UnknownDigest {
                name: s.to_string(),
                available: Self::names(),
            })
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DigestAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
