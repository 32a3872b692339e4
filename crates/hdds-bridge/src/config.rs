// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bridge configuration.
//!
//! Defaults live here and nowhere else. Resolution order:
//!
//! 1. JSON passed to `hdds_runtime_create_with_config` (missing keys keep
//!    their default)
//! 2. Environment: `HDDS_BRIDGE_WORKERS`, `HDDS_BRIDGE_QUEUE_CAPACITY`
//! 3. The constants below

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Default number of callback worker threads.
///
/// One worker preserves the per-runtime ordering of callbacks.
pub const DEFAULT_DISPATCH_WORKERS: usize = 1;

/// Upper bound on worker threads.
pub const MAX_DISPATCH_WORKERS: usize = 64;

/// Default capacity of the job hand-off queue (bounded, senders block when full).
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Default prefix for worker thread names (`<prefix>-<index>`).
pub const DEFAULT_THREAD_NAME: &str = "hdds-bridge-cb";

pub const ENV_WORKERS: &str = "HDDS_BRIDGE_WORKERS";
pub const ENV_QUEUE_CAPACITY: &str = "HDDS_BRIDGE_QUEUE_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Worker threads running caller callbacks.
    pub dispatch_workers: usize,
    /// Capacity of the bounded job queue in front of the workers.
    pub queue_capacity: usize,
    /// Worker thread name prefix.
    pub thread_name: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            dispatch_workers: DEFAULT_DISPATCH_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Defaults with environment overrides applied.
    ///
    /// Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(workers) = env_usize(ENV_WORKERS) {
            config.dispatch_workers = workers;
        }
        if let Some(capacity) = env_usize(ENV_QUEUE_CAPACITY) {
            config.queue_capacity = capacity;
        }
        config
    }

    /// Parse a JSON document, e.g. `{"dispatch_workers": 4}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BridgeConfig =
            serde_json::from_str(json).map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dispatch_workers == 0 || self.dispatch_workers > MAX_DISPATCH_WORKERS {
            return Err(BridgeError::Config(format!(
                "dispatch_workers must be 1-{}, got {}",
                MAX_DISPATCH_WORKERS, self.dispatch_workers
            )));
        }
        if self.queue_capacity == 0 {
            return Err(BridgeError::Config(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.thread_name.is_empty() {
            return Err(BridgeError::Config("thread_name is empty".to_string()));
        }
        // std refuses to name a thread with an interior NUL.
        if self.thread_name.contains('\0') {
            return Err(BridgeError::Config(
                "thread_name contains a NUL byte".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(value) => {
            log::info!("[hdds-bridge] {}={} from environment", key, value);
            Some(value)
        }
        Err(_) => {
            log::warn!("[hdds-bridge] ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}
