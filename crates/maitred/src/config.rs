//! # Platform Configuration
//!
//! One [`PlatformConfig`] covers the whole process: store channel and
//! timeout settings, cache bounds, and aggregation timing. Everything
//! carries serde defaults, so an empty config file (or
//! `PlatformConfig::default()`) yields a working setup.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use store_actor::{CacheConfig, StoreConfig};

/// Timing of the rating aggregation loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingConfig {
    /// Time between recomputation passes.
    #[serde(default = "default_period")]
    pub period: Duration,

    /// Ceiling on one pass; an overrunning cycle is abandoned and the next
    /// tick starts fresh.
    #[serde(default = "default_cycle_timeout")]
    pub cycle_timeout: Duration,
}

fn default_period() -> Duration {
    Duration::from_secs(5)
}

fn default_cycle_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
            cycle_timeout: default_cycle_timeout(),
        }
    }
}

/// Top-level configuration for [`Platform`](crate::Platform).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformConfig {
    /// Applied to all four store actors.
    #[serde(default)]
    pub store: StoreConfig,

    /// Applied to both view caches (bookings and reviews).
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub rating: RatingConfig,
}
