// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data reader operations.

use super::{query, update};
use crate::codec;
use crate::native::{InstanceHandle, ReturnCode};
use crate::qos::HddsDataReaderQos;
use crate::runtime::HddsRuntime;
use crate::status::{
    HddsRequestedIncompatibleQosStatus, HddsSampleLostStatus, HddsSubscriptionMatchedStatus,
};

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_qos` must be writable. On `OK` release with `hdds_data_reader_qos_release`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_get_qos(
    runtime: *const HddsRuntime,
    reader: InstanceHandle,
    out_qos: *mut HddsDataReaderQos,
) -> ReturnCode {
    query(
        runtime,
        out_qos,
        |reg| reg.data_reader(reader),
        |r| r.get_qos().map(|qos| HddsDataReaderQos::from_native(&qos)),
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `qos` must point to a wrapper whose buffers are NULL or valid.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_set_qos(
    runtime: *const HddsRuntime,
    reader: InstanceHandle,
    qos: *const HddsDataReaderQos,
) -> ReturnCode {
    update(
        runtime,
        qos,
        |reg| reg.data_reader(reader),
        |r, qos| r.set_qos(qos.to_native()),
    )
}

/// Handles of the publications currently matched with this reader.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_handles` must be writable. On `OK` it receives a flat sequence of
///   `InstanceHandle`, released with `hdds_release_native_ptr`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_get_matched_publications(
    runtime: *const HddsRuntime,
    reader: InstanceHandle,
    out_handles: *mut *mut u8,
) -> ReturnCode {
    query(
        runtime,
        out_handles,
        |reg| reg.data_reader(reader),
        |r| {
            r.get_matched_publications()
                .map(|handles| codec::encode(&handles).into_raw())
        },
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_status` must be writable. On `OK`, `out_status->policies` belongs
///   to the caller (`hdds_release_native_ptr`).
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_get_requested_incompatible_qos_status(
    runtime: *const HddsRuntime,
    reader: InstanceHandle,
    out_status: *mut HddsRequestedIncompatibleQosStatus,
) -> ReturnCode {
    query(
        runtime,
        out_status,
        |reg| reg.data_reader(reader),
        |r| {
            r.get_requested_incompatible_qos_status()
                .map(|status| HddsRequestedIncompatibleQosStatus::from_native(&status))
        },
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_status` must be writable.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_get_sample_lost_status(
    runtime: *const HddsRuntime,
    reader: InstanceHandle,
    out_status: *mut HddsSampleLostStatus,
) -> ReturnCode {
    query(
        runtime,
        out_status,
        |reg| reg.data_reader(reader),
        |r| r.get_sample_lost_status(),
    )
}

/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_status` must be writable.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_get_subscription_matched_status(
    runtime: *const HddsRuntime,
    reader: InstanceHandle,
    out_status: *mut HddsSubscriptionMatchedStatus,
) -> ReturnCode {
    query(
        runtime,
        out_status,
        |reg| reg.data_reader(reader),
        |r| r.get_subscription_matched_status(),
    )
}
