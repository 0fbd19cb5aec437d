//! Configuration types for statespace

use crate::error::StateSpaceError;
use crate::traits::StateSpaceResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Hash functions available for state hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Blake3,
    Sha256,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Blake3 => write!(f, "blake3"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Choice of primary and secondary hash function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashScheme {
    /// Sharding hash, truncated to 32 bits
    pub primary: HashAlgorithm,
    
    /// Identity hash, truncated to 128 bits
    pub secondary: HashAlgorithm,
}

impl HashScheme {
    pub fn new(primary: HashAlgorithm, secondary: HashAlgorithm) -> StateSpaceResult<Self> {
        let scheme = Self { primary, secondary };
        scheme.validate()?;
        Ok(scheme)
    }
    
    /// The two roles must use different functions
    pub fn validate(&self) -> StateSpaceResult<()> {
        if self.primary == self.secondary {
            return Err(StateSpaceError::Config(format!(
                "primary and secondary hash must differ, both are {}",
                self.primary
            )));
        }
        Ok(())
    }
}

impl Default for HashScheme {
    fn default() -> Self {
        Self {
            primary: HashAlgorithm::Blake3,
            secondary: HashAlgorithm::Sha256,
        }
    }
}

/// Largest bucket count an explored set accepts
pub const MAX_BUCKETS: usize = 1 << 26;

/// Explored set configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploredSetConfig {
    /// Number of buckets, fixed for the lifetime of the set
    pub buckets: usize,
}

impl ExploredSetConfig {
    pub fn validate(&self) -> StateSpaceResult<()> {
        if self.buckets == 0 || self.buckets > MAX_BUCKETS {
            return Err(StateSpaceError::InvalidBucketCount(self.buckets));
        }
        Ok(())
    }
}

impl Default for ExploredSetConfig {
    fn default() -> Self {
        Self {
            buckets: 300_007,
        }
    }
}

/// Top level configuration for an exploration run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    /// Hash functions used for every state in the run
    pub hashing: HashScheme,
    
    /// Explored set sizing
    pub explored_set: ExploredSetConfig,
    
    /// Logging level
    pub log_level: Option<String>,
}

impl ExplorationConfig {
    pub fn from_json(json: &str) -> StateSpaceResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| StateSpaceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
    
    pub fn from_file<P: AsRef<Path>>(path: P) -> StateSpaceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| StateSpaceError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
    
    pub fn validate(&self) -> StateSpaceResult<()> {
        self.hashing.validate()?;
        self.explored_set.validate()
    }
}
