//! Stable content fingerprinting.
//!
//! Fingerprints seed the fallback generator, so the same input text
//! always yields the same placeholder analysis. They must therefore be
//! stable across runs, processes, and platforms — a SHA-256 prefix is,
//! where `std`'s SipHash (random per-process keys) is not. Collision
//! resistance is incidental; nothing here is cryptographic in purpose.

use sha2::{Digest, Sha256};

/// Deterministic 128-bit digest of input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    digest: u128,
    source_len: usize,
}

impl Fingerprint {
    /// Fingerprint a single text sample. Same bytes in, same digest out.
    pub fn of(text: &str) -> Self {
        Self::of_parts(&[text])
    }

    /// Fingerprint an ordered sequence of texts (e.g. a comparison pair).
    ///
    /// Each part is length-prefixed so `["ab", "c"]` and `["a", "bc"]`
    /// produce distinct digests.
    pub fn of_parts(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        let mut source_len = 0;
        for part in parts {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part.as_bytes());
            source_len += part.len();
        }
        let hash = hasher.finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash[..16]);
        Self {
            digest: u128::from_be_bytes(bytes),
            source_len,
        }
    }

    /// The 128-bit digest value.
    pub fn digest(&self) -> u128 {
        self.digest
    }

    /// Total byte length of the fingerprinted text. Feeds the
    /// length-derived fallback score statistic.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Expand the digest into a 32-byte RNG seed.
    pub(crate) fn seed_bytes(&self) -> [u8; 32] {
        let half = self.digest.to_be_bytes();
        let mut seed = [0u8; 32];
        seed[..16].copy_from_slice(&half);
        seed[16..].copy_from_slice(&half);
        seed
    }
}
