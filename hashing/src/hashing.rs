//! Hash function adapters (BLAKE3 and SHA-256)

use sha2::{Digest, Sha256};
use statespace_core::{HashAlgorithm, HashPair, HashScheme, SecondaryHash, TokenCounts};

use crate::funnel::{funnel_marking, PrimitiveSink};

/// Incremental hasher over one of the supported algorithms
pub enum AlgorithmHasher {
    Blake3(blake3::Hasher),
    Sha256(Sha256),
}

impl AlgorithmHasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Blake3 => AlgorithmHasher::Blake3(blake3::Hasher::new()),
            HashAlgorithm::Sha256 => AlgorithmHasher::Sha256(Sha256::new()),
        }
    }
    
    pub fn update(&mut self, data: &[u8]) {
        match self {
            AlgorithmHasher::Blake3(hasher) => {
                hasher.update(data);
            }
            AlgorithmHasher::Sha256(hasher) => hasher.update(data),
        }
    }
    
    pub fn finalize(self) -> [u8; 32] {
        match self {
            AlgorithmHasher::Blake3(hasher) => *hasher.finalize().as_bytes(),
            AlgorithmHasher::Sha256(hasher) => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(&hasher.finalize());
                bytes
            }
        }
    }
}

impl PrimitiveSink for AlgorithmHasher {
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

/// Full 32-byte digest of `data`
pub fn digest(algorithm: HashAlgorithm, data: &[u8]) -> [u8; 32] {
    let mut hasher = AlgorithmHasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

fn funnel_digest(algorithm: HashAlgorithm, tangible: Option<bool>, counts: &TokenCounts) -> [u8; 32] {
    let mut hasher = AlgorithmHasher::new(algorithm);
    funnel_marking(&mut hasher, tangible, counts);
    hasher.finalize()
}

/// Primary hash: leading 4 digest bytes, little-endian
pub fn primary_hash(algorithm: HashAlgorithm, tangible: Option<bool>, counts: &TokenCounts) -> u32 {
    let digest = funnel_digest(algorithm, tangible, counts);
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Secondary hash: leading 16 digest bytes, little-endian
pub fn secondary_hash(
    algorithm: HashAlgorithm,
    tangible: Option<bool>,
    counts: &TokenCounts,
) -> SecondaryHash {
    SecondaryHash::from_digest(&funnel_digest(algorithm, tangible, counts))
}

/// Hash pair of a marking under `scheme`.
///
/// `tangible` is `None` for an unclassified state and `Some(flag)` for a
/// classified one, in which case the flag is folded in first.
pub fn hash_marking(scheme: &HashScheme, tangible: Option<bool>, counts: &TokenCounts) -> HashPair {
    HashPair::new(
        primary_hash(scheme.primary, tangible, counts),
        secondary_hash(scheme.secondary, tangible, counts),
    )
}
