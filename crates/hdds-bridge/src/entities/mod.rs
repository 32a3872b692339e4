// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity operations exposed to the caller.
//!
//! Every function takes the runtime, the entity's [`InstanceHandle`] and, for
//! queries, an out-pointer. The provider's return code is passed through
//! unchanged. The bridge itself only answers `BAD_PARAMETER` (NULL runtime or
//! out-pointer, unknown handle, string with an interior NUL).
//!
//! # Ownership of results
//!
//! | Result shape              | Release with                              |
//! |---------------------------|-------------------------------------------|
//! | flat sequence (`uint8_t*`)| `hdds_release_native_ptr`                 |
//! | basic string              | `hdds_release_basic_string_ptr`           |
//! | wide string               | `hdds_release_wide_string_ptr`            |
//! | basic string sequence     | `hdds_release_basic_string_sequence_ptr`  |
//! | wide string sequence      | `hdds_release_wide_string_sequence_ptr`   |
//! | QoS wrapper               | `hdds_<entity>_qos_release`               |
//! | incompatible QoS status   | `hdds_release_native_ptr(status.policies)`|
//!
//! Out-pointers are only written on `OK`.

pub mod participant;
pub mod pubsub;
pub mod reader;
pub mod topic;
pub mod writer;

use crate::error::{BridgeError, Result};
use crate::native::ReturnCode;
use crate::registry::EntityRegistry;
use crate::runtime::{BridgeRuntime, HddsRuntime};

/// Resolve an entity, fetch a value from it and store it in `out`.
pub(crate) unsafe fn query<E, T>(
    runtime: *const HddsRuntime,
    out: *mut T,
    lookup: impl FnOnce(&EntityRegistry) -> Result<E>,
    fetch: impl FnOnce(E) -> core::result::Result<T, ReturnCode>,
) -> ReturnCode {
    if out.is_null() {
        return BridgeError::NullArgument("out").into();
    }
    let entity = match BridgeRuntime::resolve(runtime).and_then(|rt| lookup(rt.registry())) {
        Ok(entity) => entity,
        Err(e) => return e.into(),
    };
    match fetch(entity) {
        Ok(value) => {
            out.write(value);
            ReturnCode::Ok
        }
        Err(code) => code,
    }
}

/// Resolve an entity and apply `input` to it.
pub(crate) unsafe fn update<E, I>(
    runtime: *const HddsRuntime,
    input: *const I,
    lookup: impl FnOnce(&EntityRegistry) -> Result<E>,
    apply: impl FnOnce(E, &I) -> ReturnCode,
) -> ReturnCode {
    let Some(input) = input.as_ref() else {
        return BridgeError::NullArgument("input").into();
    };
    match BridgeRuntime::resolve(runtime).and_then(|rt| lookup(rt.registry())) {
        Ok(entity) => apply(entity, input),
        Err(e) => e.into(),
    }
}
