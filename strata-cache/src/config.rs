//! Cache configuration.

use serde::{Deserialize, Serialize};
use strata_core::{CacheError, CacheResult};

/// Configuration for the query-result cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of live entries per generation. Inserting beyond
    /// this evicts the oldest entries from the writable generation.
    pub capacity: usize,

    /// Hold result payloads behind weak references so results dropped by
    /// the rest of the system are reclaimed while their keys stay
    /// resident. A weak slot provides no retention of its own, so this is
    /// opt-in for deployments that pin results elsewhere; by default the
    /// cache holds payloads strongly and capacity eviction bounds memory.
    pub weak_results: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 4096,
            weak_results: false,
        }
    }
}

impl CacheConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-generation entry capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enable or disable weak payload retention.
    pub fn with_weak_results(mut self, weak: bool) -> Self {
        self.weak_results = weak;
        self
    }

    /// Reject configurations the store cannot honor.
    pub fn validate(&self) -> CacheResult<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig {
                reason: "capacity must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_retains_strongly() {
        let config = CacheConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.weak_results);
    }

    #[test]
    fn builder_sets_fields() {
        let config = CacheConfig::new().with_capacity(16).with_weak_results(true);
        assert_eq!(config.capacity, 16);
        assert!(config.weak_results);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = CacheConfig::new().with_capacity(0).validate().unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig { .. }));
    }

    #[test]
    fn serde_roundtrip() {
        let config = CacheConfig::new().with_capacity(128);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: CacheConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, back);
    }
}
