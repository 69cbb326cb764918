//! Short code derivation from URL digests.
//!
//! Codes are the leading 64 bits of a SHA-2 digest reduced into the 62^7
//! code space and written as exactly seven base62 characters. The base62
//! alphabet is URL-safe as-is, so no character substitution is needed.

use chrono::Utc;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

use crate::domain::entities::SHORT_CODE_LENGTH;

/// Digits, then uppercase, then lowercase letters.
const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of distinct seven-character base62 codes.
const CODE_SPACE: u64 = 62u64.pow(SHORT_CODE_LENGTH as u32);

/// Digest functions that can seed code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Looks up a digest by name (`sha256`, `SHA-256`, ...).
    ///
    /// Returns `None` for anything this build does not provide.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha224" => Some(Self::Sha224),
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// First eight digest bytes of `input`, big-endian.
    fn leading_u64(self, input: &[u8]) -> u64 {
        match self {
            Self::Sha224 => leading_u64(&Sha224::digest(input)),
            Self::Sha256 => leading_u64(&Sha256::digest(input)),
            Self::Sha384 => leading_u64(&Sha384::digest(input)),
            Self::Sha512 => leading_u64(&Sha512::digest(input)),
        }
    }
}

fn leading_u64(digest: &[u8]) -> u64 {
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

#[derive(Debug)]
enum Source {
    Digest(DigestAlgorithm),
    /// Degraded mode: a process-local counter seeded from the clock.
    Sequence(AtomicU64),
}

/// Derives seven-character alphanumeric short codes.
///
/// In digest mode the same input always yields the same code. In fallback
/// mode every call yields the next code in sequence and the input is ignored.
#[derive(Debug)]
pub struct CodeGenerator {
    source: Source,
}

impl CodeGenerator {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            source: Source::Digest(algorithm),
        }
    }

    /// Builds a generator for the named digest, falling back to sequence
    /// mode when the digest is unavailable.
    pub fn from_algorithm(name: &str) -> Self {
        match DigestAlgorithm::from_name(name) {
            Some(algorithm) => Self::new(algorithm),
            None => {
                warn!(
                    digest = name,
                    "Digest unavailable, short codes will come from a timestamp-seeded sequence"
                );
                Self::fallback()
            }
        }
    }

    /// Sequence-mode generator seeded with the current time in milliseconds.
    pub fn fallback() -> Self {
        let seed = Utc::now().timestamp_millis().unsigned_abs();
        Self {
            source: Source::Sequence(AtomicU64::new(seed)),
        }
    }

    /// True when codes are not derived from a digest.
    pub fn is_degraded(&self) -> bool {
        matches!(self.source, Source::Sequence(_))
    }

    /// Name of the active code source, for logs.
    pub fn source_name(&self) -> &'static str {
        match &self.source {
            Source::Digest(algorithm) => algorithm.name(),
            Source::Sequence(_) => "sequence",
        }
    }

    /// Produces a candidate code for `input`.
    pub fn generate(&self, input: &str) -> String {
        let value = match &self.source {
            Source::Digest(algorithm) => algorithm.leading_u64(input.as_bytes()),
            Source::Sequence(next) => next.fetch_add(1, Ordering::Relaxed),
        };

        encode_base62(value)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DigestAlgorithm::Sha256)
    }
}

/// Writes `value` (reduced into the code space) as exactly
/// [`SHORT_CODE_LENGTH`] base62 characters, zero-padded on the left.
pub fn encode_base62(value: u64) -> String {
    let mut remaining = value % CODE_SPACE;
    let mut digits = [BASE62_ALPHABET[0]; SHORT_CODE_LENGTH];

    for digit in digits.iter_mut().rev() {
        *digit = BASE62_ALPHABET[(remaining % 62) as usize];
        remaining /= 62;
    }

    digits.iter().map(|&b| char::from(b)).collect()
}
