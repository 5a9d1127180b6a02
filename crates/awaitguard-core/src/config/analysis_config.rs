//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_POLICY_CACHE_CAPACITY;

/// Configuration for rule execution.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Expected number of compilations, used to pre-size the policy cache.
    /// Not a limit: resolved policies are never evicted. Default: 1024.
    pub policy_cache_capacity: Option<u64>,
    /// Analyze suspension points in parallel. Default: false.
    pub parallel: Option<bool>,
}

impl AnalysisConfig {
    /// Returns the effective policy cache capacity, defaulting to 1024.
    pub fn effective_policy_cache_capacity(&self) -> u64 {
        self.policy_cache_capacity
            .unwrap_or(DEFAULT_POLICY_CACHE_CAPACITY)
    }

    /// Returns whether parallel analysis is enabled, defaulting to false.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }
}
