// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bridge runtime.
//!
//! One runtime owns the callback executor and the entity registry. It is
//! created and destroyed explicitly; there is no process-wide instance, so
//! several runtimes (e.g. one per embedded interpreter) can coexist.
//!
//! # Usage from C
//!
//! ```c
//! HddsRuntime* rt = hdds_runtime_create_with_config("{\"dispatch_workers\": 2}");
//! /* ... listeners, queries ... */
//! hdds_runtime_destroy(rt);
//! ```

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::dispatch::CallbackExecutor;
use crate::error::{BridgeError, Result};
use crate::registry::EntityRegistry;

/// Opaque handle to a bridge runtime.
#[repr(C)]
pub struct HddsRuntime {
    _private: [u8; 0],
}

pub struct BridgeRuntime {
    config: BridgeConfig,
    executor: Arc<CallbackExecutor>,
    registry: EntityRegistry,
}

impl BridgeRuntime {
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let executor = CallbackExecutor::new(&config)?;
        log::info!(
            "[hdds-bridge] runtime created ({} dispatch worker(s))",
            config.dispatch_workers
        );
        Ok(Self {
            config,
            executor: Arc::new(executor),
            registry: EntityRegistry::new(),
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Shared with every listener created on this runtime; the workers stay
    /// up until the last of them is gone.
    pub fn executor(&self) -> &Arc<CallbackExecutor> {
        &self.executor
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Hand the runtime to the caller as an opaque handle.
    pub fn into_handle(self) -> *mut HddsRuntime {
        Box::into_raw(Box::new(self)).cast::<HddsRuntime>()
    }

    /// Borrow the runtime behind a handle. Null yields `None`.
    ///
    /// # Safety
    /// `handle` must be null or a live handle from `into_handle` /
    /// `hdds_runtime_create*`, and must outlive `'a`.
    pub unsafe fn from_handle<'a>(handle: *const HddsRuntime) -> Option<&'a BridgeRuntime> {
        handle.cast::<BridgeRuntime>().as_ref()
    }

    pub(crate) unsafe fn resolve<'a>(handle: *const HddsRuntime) -> Result<&'a BridgeRuntime> {
        Self::from_handle(handle).ok_or(BridgeError::NullArgument("runtime"))
    }
}

impl Drop for BridgeRuntime {
    fn drop(&mut self) {
        log::info!(
            "[hdds-bridge] runtime destroyed ({} entities still registered)",
            self.registry.len()
        );
    }
}

/// Create a runtime with defaults and environment overrides
/// (`HDDS_BRIDGE_WORKERS`, `HDDS_BRIDGE_QUEUE_CAPACITY`).
///
/// # Safety
/// Always safe to call. Returns NULL if the executor cannot start.
#[no_mangle]
pub unsafe extern "C" fn hdds_runtime_create() -> *mut HddsRuntime {
    create(BridgeConfig::from_env())
}

/// Create a runtime from a JSON configuration document.
///
/// Keys not present keep their default. Unknown keys are rejected.
///
/// # Safety
/// - `config_json` must be a valid null-terminated UTF-8 string, or NULL for
///   the same result as `hdds_runtime_create`.
///
/// # Returns
/// The runtime handle, or NULL if the document is invalid.
#[no_mangle]
pub unsafe extern "C" fn hdds_runtime_create_with_config(
    config_json: *const c_char,
) -> *mut HddsRuntime {
    if config_json.is_null() {
        return hdds_runtime_create();
    }
    let Ok(json) = CStr::from_ptr(config_json).to_str() else {
        log::error!("[hdds-bridge] runtime config is not valid UTF-8");
        return ptr::null_mut();
    };
    match BridgeConfig::from_json(json) {
        Ok(config) => create(config),
        Err(e) => {
            log::error!("[hdds-bridge] {}", e);
            ptr::null_mut()
        }
    }
}

fn create(config: BridgeConfig) -> *mut HddsRuntime {
    match BridgeRuntime::new(config) {
        Ok(runtime) => runtime.into_handle(),
        Err(e) => {
            log::error!("[hdds-bridge] runtime creation failed: {}", e);
            ptr::null_mut()
        }
    }
}

/// Destroy a runtime.
///
/// Listeners created on it remain usable until destroyed themselves.
///
/// # Safety
/// - `runtime` must be NULL or a handle from `hdds_runtime_create*`.
/// - Must not be called more than once with the same pointer.
#[no_mangle]
pub unsafe extern "C" fn hdds_runtime_destroy(runtime: *mut HddsRuntime) {
    if !runtime.is_null() {
        drop(Box::from_raw(runtime.cast::<BridgeRuntime>()));
    }
}
