//! Cache sizing configuration

use netinv::{Error, Result};
use serde::Deserialize;

/// Default number of slots preallocated per table
pub const DEFAULT_INITIAL_CAPACITY: usize = 1000;

/// Default ceiling on live entries per table
pub const DEFAULT_MAX_CAPACITY: usize = 5000;

/// Sizing for both lookup tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Slots preallocated at construction
    pub initial_capacity: usize,
    /// Entries held before the least recently used one is evicted
    pub max_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a config with default sizing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preallocation hint
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the entry ceiling
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Reject sizings the tables cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.max_capacity == 0 {
            return Err(Error::InvalidConfig(
                "max_capacity must be greater than 0".to_string(),
            ));
        }
        if self.initial_capacity > self.max_capacity {
            return Err(Error::InvalidConfig(format!(
                "initial_capacity {} exceeds max_capacity {}",
                self.initial_capacity, self.max_capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.initial_capacity, 1000);
        assert_eq!(config.max_capacity, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(CacheConfig::new().with_max_capacity(0).validate().is_err());
        assert!(CacheConfig::new()
            .with_initial_capacity(10)
            .with_max_capacity(5)
            .validate()
            .is_err());
        assert!(CacheConfig::new()
            .with_initial_capacity(0)
            .with_max_capacity(1)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CacheConfig = serde_json::from_str(r#"{"max_capacity": 200}"#).unwrap();
        assert_eq!(config.max_capacity, 200);
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    }
}
