// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data writer listener bridge.

use std::sync::Arc;

use super::callbacks::HddsDataWriterListenerCallbacks;
use super::ListenerBridge;
use crate::dispatch::{ListenerCore, ListenerEvent};
use crate::native::status::{
    LivelinessLostStatus, OfferedDeadlineMissedStatus, OfferedIncompatibleQosStatus,
    PublicationMatchedStatus,
};
use crate::native::{DataWriterListener, InstanceHandle, ReturnCode, StatusMask};
use crate::runtime::{BridgeRuntime, HddsRuntime};

/// Opaque handle to a data writer listener.
#[repr(C)]
pub struct HddsDataWriterListener {
    _private: [u8; 0],
}

pub struct DataWriterListenerBridge {
    core: ListenerCore<HddsDataWriterListenerCallbacks>,
}

impl ListenerBridge for DataWriterListenerBridge {
    type Callbacks = HddsDataWriterListenerCallbacks;

    fn from_core(core: ListenerCore<Self::Callbacks>) -> Self {
        Self { core }
    }

    fn core(&self) -> &ListenerCore<Self::Callbacks> {
        &self.core
    }
}

impl DataWriterListener for DataWriterListenerBridge {
    fn on_offered_deadline_missed(
        &self,
        writer: InstanceHandle,
        status: OfferedDeadlineMissedStatus,
    ) {
        self.core.dispatch(writer, ListenerEvent::OfferedDeadlineMissed(status));
    }

    fn on_offered_incompatible_qos(
        &self,
        writer: InstanceHandle,
        status: OfferedIncompatibleQosStatus,
    ) {
        self.core.dispatch(writer, ListenerEvent::OfferedIncompatibleQos(status));
    }

    fn on_liveliness_lost(&self, writer: InstanceHandle, status: LivelinessLostStatus) {
        self.core.dispatch(writer, ListenerEvent::LivelinessLost(status));
    }

    fn on_publication_matched(&self, writer: InstanceHandle, status: PublicationMatchedStatus) {
        self.core.dispatch(writer, ListenerEvent::PublicationMatched(status));
    }
}

impl Drop for DataWriterListenerBridge {
    fn drop(&mut self) {
        self.core.dispose();
    }
}

/// Create a data writer listener. The callback table is copied.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `callbacks` must point to an initialized table; its slots and
///   `user_data` must stay valid until the listener is disposed.
///
/// # Returns
/// The listener handle, or NULL if an argument is NULL.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_listener_create(
    runtime: *const HddsRuntime,
    callbacks: *const HddsDataWriterListenerCallbacks,
) -> *mut HddsDataWriterListener {
    super::create_handle::<DataWriterListenerBridge, _>(runtime, callbacks)
}

/// Stop delivering events and wait for running callbacks to return.
///
/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_data_writer_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_listener_dispose(
    listener: *const HddsDataWriterListener,
) -> ReturnCode {
    super::dispose_handle::<DataWriterListenerBridge, _>(listener)
}

/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_data_writer_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_listener_is_disposed(
    listener: *const HddsDataWriterListener,
) -> bool {
    super::is_disposed_handle::<DataWriterListenerBridge, _>(listener)
}

/// Dispose the listener and release the caller's handle.
///
/// # Safety
/// - `listener` must be NULL or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_listener_destroy(listener: *mut HddsDataWriterListener) {
    super::destroy_handle::<DataWriterListenerBridge, _>(listener);
}

/// Attach `listener` to a data writer, or detach with NULL.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `listener` must be NULL or a live data writer listener handle.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_set_listener(
    runtime: *const HddsRuntime,
    writer: InstanceHandle,
    listener: *const HddsDataWriterListener,
    mask: StatusMask,
) -> ReturnCode {
    let entity = match BridgeRuntime::resolve(runtime)
        .and_then(|rt| rt.registry().data_writer(writer))
    {
        Ok(entity) => entity,
        Err(e) => return e.into(),
    };
    let listener = super::bridge_ref::<DataWriterListenerBridge, _>(listener)
        .map(|bridge| Arc::clone(bridge) as Arc<dyn DataWriterListener>);
    entity.set_listener(listener, mask)
}
