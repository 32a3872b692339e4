// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # HDDS Bridge
//!
//! C-ABI boundary between a DDS provider and a foreign caller runtime
//! (C, C#, Java, Python through their native interfaces).
//!
//! - **Listener dispatch**: provider listener calls are forwarded to caller
//!   callback tables on bridge-owned worker threads. Disposal is race-free:
//!   once `hdds_*_listener_dispose` returns, no callback of that listener
//!   runs.
//! - **Sequence codec**: variable-length data crosses as flat,
//!   length-prefixed buffers allocated with the C allocator.
//! - **Wrappers**: fixed-layout QoS and status mirrors built on the codec.
//! - **Release functions**: one per buffer shape.
//!
//! The provider implements the traits in [`native`] and registers its
//! entities with a [`BridgeRuntime`].
//!
//! # Safety
//!
//! All exported functions are `unsafe` and require the caller to uphold the
//! invariants documented in each function's safety comment.

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod entities;
pub mod error;
pub mod listener;
pub mod logging;
pub mod native;
pub mod qos;
pub mod registry;
pub mod release;
pub mod runtime;
pub mod status;

pub use codec::{FlatSequence, NestedBuffers, Scoped, StringSequence};
pub use config::BridgeConfig;
pub use dispatch::{CallbackExecutor, CallbackTable, ListenerCore, ListenerEvent};
pub use error::{BridgeError, Result};
pub use listener::ListenerBridge;
pub use native::{InstanceHandle, ReturnCode, StatusKind, StatusMask};
pub use registry::{EntityRef, EntityRegistry};
pub use runtime::{BridgeRuntime, HddsRuntime};

use std::os::raw::c_char;

/// Bridge library version.
///
/// # Safety
/// The returned pointer is valid for the lifetime of the process (static storage).
#[no_mangle]
pub unsafe extern "C" fn hdds_bridge_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}
