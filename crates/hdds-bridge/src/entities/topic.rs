// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Topic operations.

use std::os::raw::c_char;

use super::{query, update};
use crate::codec::strings;
use crate::native::{InstanceHandle, ReturnCode};
use crate::qos::HddsTopicQos;
use crate::runtime::HddsRuntime;
use crate::status::HddsInconsistentTopicStatus;

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_qos` must be writable. On `OK` release with `hdds_topic_qos_release`.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_get_qos(
    runtime: *const HddsRuntime,
    topic: InstanceHandle,
    out_qos: *mut HddsTopicQos,
) -> ReturnCode {
    query(
        runtime,
        out_qos,
        |reg| reg.topic(topic),
        |t| t.get_qos().map(|qos| HddsTopicQos::from_native(&qos)),
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `qos` must point to a wrapper whose buffers are NULL or valid.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_set_qos(
    runtime: *const HddsRuntime,
    topic: InstanceHandle,
    qos: *const HddsTopicQos,
) -> ReturnCode {
    update(runtime, qos, |reg| reg.topic(topic), |t, qos| t.set_qos(qos.to_native()))
}

/// Topic name as a basic string. Release with `hdds_release_basic_string_ptr`.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_name` must be writable.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_get_name(
    runtime: *const HddsRuntime,
    topic: InstanceHandle,
    out_name: *mut *mut c_char,
) -> ReturnCode {
    query(
        runtime,
        out_name,
        |reg| reg.topic(topic),
        |t| Ok(strings::duplicate_str::<c_char>(&t.get_name())?.as_ptr()),
    )
}

/// Topic name as a wide string. Release with `hdds_release_wide_string_ptr`.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_name` must be writable.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_get_name_wide(
    runtime: *const HddsRuntime,
    topic: InstanceHandle,
    out_name: *mut *mut libc::wchar_t,
) -> ReturnCode {
    query(
        runtime,
        out_name,
        |reg| reg.topic(topic),
        |t| Ok(strings::duplicate_str::<libc::wchar_t>(&t.get_name())?.as_ptr()),
    )
}

/// Registered type name as a basic string. Release with
/// `hdds_release_basic_string_ptr`.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_type_name` must be writable.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_get_type_name(
    runtime: *const HddsRuntime,
    topic: InstanceHandle,
    out_type_name: *mut *mut c_char,
) -> ReturnCode {
    query(
        runtime,
        out_type_name,
        |reg| reg.topic(topic),
        |t| Ok(strings::duplicate_str::<c_char>(&t.get_type_name())?.as_ptr()),
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_status` must be writable.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_get_inconsistent_topic_status(
    runtime: *const HddsRuntime,
    topic: InstanceHandle,
    out_status: *mut HddsInconsistentTopicStatus,
) -> ReturnCode {
    query(
        runtime,
        out_status,
        |reg| reg.topic(topic),
        |t| t.get_inconsistent_topic_status(),
    )
}
