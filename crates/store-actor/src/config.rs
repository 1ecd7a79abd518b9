//! Configuration for store actors and read-through caches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Store actor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Capacity of the actor's request channel.
    #[serde(default = "default_buffer")]
    pub buffer: usize,

    /// How long a client waits for the actor to answer one call.
    #[serde(default = "default_op_timeout")]
    pub op_timeout: Duration,

    /// Retry policy applied to idempotent reads. Mutations are never
    /// retried; a lost reply does not mean the write was lost.
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_buffer() -> usize {
    32
}

fn default_op_timeout() -> Duration {
    Duration::from_secs(2)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer: default_buffer(),
            op_timeout: default_op_timeout(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Read-through cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of entries per cache segment.
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,

    /// Time-to-live for cached entries.
    #[serde(default = "default_ttl")]
    pub ttl: Duration,
}

fn default_max_entries() -> u64 {
    10_000
}

fn default_ttl() -> Duration {
    Duration::from_secs(60)
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl: default_ttl(),
        }
    }
}
