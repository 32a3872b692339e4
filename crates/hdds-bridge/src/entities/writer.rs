// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data writer operations.

use super::{query, update};
use crate::codec;
use crate::native::{InstanceHandle, ReturnCode};
use crate::qos::HddsDataWriterQos;
use crate::runtime::HddsRuntime;
use crate::status::{HddsOfferedIncompatibleQosStatus, HddsPublicationMatchedStatus};

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_qos` must be writable. On `OK` release with `hdds_data_writer_qos_release`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_get_qos(
    runtime: *const HddsRuntime,
    writer: InstanceHandle,
    out_qos: *mut HddsDataWriterQos,
) -> ReturnCode {
    query(
        runtime,
        out_qos,
        |reg| reg.data_writer(writer),
        |w| w.get_qos().map(|qos| HddsDataWriterQos::from_native(&qos)),
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `qos` must point to a wrapper whose buffers are NULL or valid.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_set_qos(
    runtime: *const HddsRuntime,
    writer: InstanceHandle,
    qos: *const HddsDataWriterQos,
) -> ReturnCode {
    update(
        runtime,
        qos,
        |reg| reg.data_writer(writer),
        |w, qos| w.set_qos(qos.to_native()),
    )
}

/// Handles of the subscriptions currently matched with this writer.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_handles` must be writable. On `OK` it receives a flat sequence of
///   `InstanceHandle`, released with `hdds_release_native_ptr`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_get_matched_subscriptions(
    runtime: *const HddsRuntime,
    writer: InstanceHandle,
    out_handles: *mut *mut u8,
) -> ReturnCode {
    query(
        runtime,
        out_handles,
        |reg| reg.data_writer(writer),
        |w| {
            w.get_matched_subscriptions()
                .map(|handles| codec::encode(&handles).into_raw())
        },
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_status` must be writable. On `OK`, `out_status->policies` belongs
///   to the caller (`hdds_release_native_ptr`).
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_get_offered_incompatible_qos_status(
    runtime: *const HddsRuntime,
    writer: InstanceHandle,
    out_status: *mut HddsOfferedIncompatibleQosStatus,
) -> ReturnCode {
    query(
        runtime,
        out_status,
        |reg| reg.data_writer(writer),
        |w| {
            w.get_offered_incompatible_qos_status()
                .map(|status| HddsOfferedIncompatibleQosStatus::from_native(&status))
        },
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_status` must be writable.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_get_publication_matched_status(
    runtime: *const HddsRuntime,
    writer: InstanceHandle,
    out_status: *mut HddsPublicationMatchedStatus,
) -> ReturnCode {
    query(
        runtime,
        out_status,
        |reg| reg.data_writer(writer),
        |w| w.get_publication_matched_status(),
    )
}
