// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Errors raised by the bridge itself.
//!
//! Provider failures are not represented here: they are carried as the
//! provider's [`ReturnCode`] and handed to the caller unchanged.

use crate::native::{InstanceHandle, ReturnCode};

/// Errors produced by bridge machinery (configuration, executor, registry).
#[derive(Debug)]
pub enum BridgeError {
    /// A required pointer argument was null.
    NullArgument(&'static str),
    /// No entity of the expected kind is registered under this handle.
    UnknownEntity(InstanceHandle),
    /// The configuration could not be parsed or is out of range.
    Config(String),
    /// The callback executor has shut down and accepts no more work.
    ExecutorStopped,
    /// A callback job panicked inside a worker.
    CallbackPanicked,
    /// Spawning an executor worker thread failed.
    WorkerSpawn(std::io::Error),
    /// A string returned by the provider contains an interior NUL.
    InteriorNul,
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::NullArgument(name) => write!(f, "Null argument: {}", name),
            BridgeError::UnknownEntity(handle) => write!(f, "Unknown entity: {}", handle),
            BridgeError::Config(msg) => write!(f, "Invalid bridge configuration: {}", msg),
            BridgeError::ExecutorStopped => write!(f, "Callback executor stopped"),
            BridgeError::CallbackPanicked => write!(f, "Callback job panicked"),
            BridgeError::WorkerSpawn(e) => write!(f, "Failed to spawn executor worker: {}", e),
            BridgeError::InteriorNul => write!(f, "String contains an interior NUL byte"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BridgeError::WorkerSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BridgeError> for ReturnCode {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::NullArgument(_)
            | BridgeError::UnknownEntity(_)
            | BridgeError::Config(_)
            | BridgeError::InteriorNul => ReturnCode::BadParameter,
            BridgeError::ExecutorStopped
            | BridgeError::CallbackPanicked
            | BridgeError::WorkerSpawn(_) => ReturnCode::Error,
        }
    }
}

/// Result alias for bridge operations.
pub type Result<T> = core::result::Result<T, BridgeError>;
