// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Domain participant operations.

use std::os::raw::c_char;

use super::{query, update};
use crate::codec::{self, StringSequence};
use crate::native::{InstanceHandle, ReturnCode};
use crate::qos::HddsDomainParticipantQos;
use crate::runtime::HddsRuntime;

/// Get the participant QoS.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_qos` must be writable. On `OK` its buffers belong to the caller
///   (`hdds_domain_participant_qos_release`).
#[no_mangle]
pub unsafe extern "C" fn hdds_domain_participant_get_qos(
    runtime: *const HddsRuntime,
    participant: InstanceHandle,
    out_qos: *mut HddsDomainParticipantQos,
) -> ReturnCode {
    query(
        runtime,
        out_qos,
        |reg| reg.participant(participant),
        |p| p.get_qos().map(|qos| HddsDomainParticipantQos::from_native(&qos)),
    )
}

/// Set the participant QoS. `qos` is only read.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `qos` must point to a wrapper whose buffers are NULL or valid.
#[no_mangle]
pub unsafe extern "C" fn hdds_domain_participant_set_qos(
    runtime: *const HddsRuntime,
    participant: InstanceHandle,
    qos: *const HddsDomainParticipantQos,
) -> ReturnCode {
    update(
        runtime,
        qos,
        |reg| reg.participant(participant),
        |p, qos| p.set_qos(qos.to_native()),
    )
}

/// Handles of the remote participants discovered so far.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_handles` must be writable. On `OK` it receives a flat sequence of
///   `InstanceHandle`, released with `hdds_release_native_ptr`.
#[no_mangle]
pub unsafe extern "C" fn hdds_domain_participant_get_discovered_participants(
    runtime: *const HddsRuntime,
    participant: InstanceHandle,
    out_handles: *mut *mut u8,
) -> ReturnCode {
    query(
        runtime,
        out_handles,
        |reg| reg.participant(participant),
        |p| {
            p.get_discovered_participants()
                .map(|handles| codec::encode(&handles).into_raw())
        },
    )
}

/// Names of the topics discovered so far, as a basic string sequence.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_names` must be writable. On `OK` release the result with
///   `hdds_release_basic_string_sequence_ptr`.
#[no_mangle]
pub unsafe extern "C" fn hdds_domain_participant_get_discovered_topic_names(
    runtime: *const HddsRuntime,
    participant: InstanceHandle,
    out_names: *mut *mut u8,
) -> ReturnCode {
    query(
        runtime,
        out_names,
        |reg| reg.participant(participant),
        |p| {
            let names = p.get_discovered_topic_names()?;
            Ok(StringSequence::<c_char>::encode(&names)?.into_raw())
        },
    )
}

/// Wide-string variant of `hdds_domain_participant_get_discovered_topic_names`.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `out_names` must be writable. On `OK` release the result with
///   `hdds_release_wide_string_sequence_ptr`.
#[no_mangle]
pub unsafe extern "C" fn hdds_domain_participant_get_discovered_topic_names_wide(
    runtime: *const HddsRuntime,
    participant: InstanceHandle,
    out_names: *mut *mut u8,
) -> ReturnCode {
    query(
        runtime,
        out_names,
        |reg| reg.participant(participant),
        |p| {
            let names = p.get_discovered_topic_names()?;
            Ok(StringSequence::<libc::wchar_t>::encode(&names)?.into_raw())
        },
    )
}
