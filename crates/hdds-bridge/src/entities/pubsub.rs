// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Publisher and subscriber operations.

use super::{query, update};
use crate::native::{InstanceHandle, ReturnCode};
use crate::qos::{HddsPublisherQos, HddsSubscriberQos};
use crate::runtime::HddsRuntime;

/// Get the publisher QoS.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_qos` must be writable. On `OK` release with `hdds_publisher_qos_release`.
///
/// # Returns
/// `BAD_PARAMETER` if a partition name contains an interior NUL.
#[no_mangle]
pub unsafe extern "C" fn hdds_publisher_get_qos(
    runtime: *const HddsRuntime,
    publisher: InstanceHandle,
    out_qos: *mut HddsPublisherQos,
) -> ReturnCode {
    query(
        runtime,
        out_qos,
        |reg| reg.publisher(publisher),
        |p| Ok(HddsPublisherQos::from_native(&p.get_qos()?)?),
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `qos` must point to a wrapper whose buffers are NULL or valid.
#[no_mangle]
pub unsafe extern "C" fn hdds_publisher_set_qos(
    runtime: *const HddsRuntime,
    publisher: InstanceHandle,
    qos: *const HddsPublisherQos,
) -> ReturnCode {
    update(
        runtime,
        qos,
        |reg| reg.publisher(publisher),
        |p, qos| p.set_qos(qos.to_native()),
    )
}

/// Get the subscriber QoS.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_qos` must be writable. On `OK` release with `hdds_subscriber_qos_release`.
#[no_mangle]
pub unsafe extern "C" fn hdds_subscriber_get_qos(
    runtime: *const HddsRuntime,
    subscriber: InstanceHandle,
    out_qos: *mut HddsSubscriberQos,
) -> ReturnCode {
    query(
        runtime,
        out_qos,
        |reg| reg.subscriber(subscriber),
        |s| Ok(HddsSubscriberQos::from_native(&s.get_qos()?)?),
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `qos` must point to a wrapper whose buffers are NULL or valid.
#[no_mangle]
pub unsafe extern "C" fn hdds_subscriber_set_qos(
    runtime: *const HddsRuntime,
    subscriber: InstanceHandle,
    qos: *const HddsSubscriberQos,
) -> ReturnCode {
    update(
        runtime,
        qos,
        |reg| reg.subscriber(subscriber),
        |s, qos| s.set_qos(qos.to_native()),
    )
}
