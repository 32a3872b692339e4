// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data reader listener bridge.

use std::sync::Arc;

use super::callbacks::HddsDataReaderListenerCallbacks;
use super::ListenerBridge;
use crate::dispatch::{ListenerCore, ListenerEvent};
use crate::native::status::{
    LivelinessChangedStatus, RequestedDeadlineMissedStatus, RequestedIncompatibleQosStatus,
    SampleLostStatus, SampleRejectedStatus, SubscriptionMatchedStatus,
};
use crate::native::{DataReaderListener, InstanceHandle, ReturnCode, StatusMask};
use crate::runtime::{BridgeRuntime, HddsRuntime};

/// Opaque handle to a data reader listener.
#[repr(C)]
pub struct HddsDataReaderListener {
    _private: [u8; 0],
}

pub struct DataReaderListenerBridge {
    core: ListenerCore<HddsDataReaderListenerCallbacks>,
}

impl ListenerBridge for DataReaderListenerBridge {
    type Callbacks = HddsDataReaderListenerCallbacks;

    fn from_core(core: ListenerCore<Self::Callbacks>) -> Self {
        Self { core }
    }

    fn core(&self) -> &ListenerCore<Self::Callbacks> {
        &self.core
    }
}

impl DataReaderListener for DataReaderListenerBridge {
    fn on_requested_deadline_missed(
        &self,
        reader: InstanceHandle,
        status: RequestedDeadlineMissedStatus,
    ) {
        self.core.dispatch(reader, ListenerEvent::RequestedDeadlineMissed(status));
    }

    fn on_requested_incompatible_qos(
        &self,
        reader: InstanceHandle,
        status: RequestedIncompatibleQosStatus,
    ) {
        self.core.dispatch(reader, ListenerEvent::RequestedIncompatibleQos(status));
    }

    fn on_sample_rejected(&self, reader: InstanceHandle, status: SampleRejectedStatus) {
        self.core.dispatch(reader, ListenerEvent::SampleRejected(status));
    }

    fn on_liveliness_changed(&self, reader: InstanceHandle, status: LivelinessChangedStatus) {
        self.core.dispatch(reader, ListenerEvent::LivelinessChanged(status));
    }

    fn on_data_available(&self, reader: InstanceHandle) {
        self.core.dispatch(reader, ListenerEvent::DataAvailable);
    }

    fn on_subscription_matched(&self, reader: InstanceHandle, status: SubscriptionMatchedStatus) {
        self.core.dispatch(reader, ListenerEvent::SubscriptionMatched(status));
    }

    fn on_sample_lost(&self, reader: InstanceHandle, status: SampleLostStatus) {
        self.core.dispatch(reader, ListenerEvent::SampleLost(status));
    }
}

impl Drop for DataReaderListenerBridge {
    fn drop(&mut self) {
        self.core.dispose();
    }
}

/// Create a data reader listener. The callback table is copied.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `callbacks` must point to an initialized table; its slots and
///   `user_data` must stay valid until the listener is disposed.
///
/// # Returns
/// The listener handle, or NULL if an argument is NULL.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_listener_create(
    runtime: *const HddsRuntime,
    callbacks: *const HddsDataReaderListenerCallbacks,
) -> *mut HddsDataReaderListener {
    super::create_handle::<DataReaderListenerBridge, _>(runtime, callbacks)
}

/// Stop delivering events and wait for running callbacks to return.
///
/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_data_reader_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_listener_dispose(
    listener: *const HddsDataReaderListener,
) -> ReturnCode {
    super::dispose_handle::<DataReaderListenerBridge, _>(listener)
}

/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_data_reader_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_listener_is_disposed(
    listener: *const HddsDataReaderListener,
) -> bool {
    super::is_disposed_handle::<DataReaderListenerBridge, _>(listener)
}

/// Dispose the listener and release the caller's handle.
///
/// # Safety
/// - `listener` must be NULL or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_listener_destroy(listener: *mut HddsDataReaderListener) {
    super::destroy_handle::<DataReaderListenerBridge, _>(listener);
}

/// Attach `listener` to a data reader, or detach with NULL.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `listener` must be NULL or a live data reader listener handle.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_set_listener(
    runtime: *const HddsRuntime,
    reader: InstanceHandle,
    listener: *const HddsDataReaderListener,
    mask: StatusMask,
) -> ReturnCode {
    let entity = match BridgeRuntime::resolve(runtime)
        .and_then(|rt| rt.registry().data_reader(reader))
    {
        Ok(entity) => entity,
        Err(e) => return e.into(),
    };
    let listener = super::bridge_ref::<DataReaderListenerBridge, _>(listener)
        .map(|bridge| Arc::clone(bridge) as Arc<dyn DataReaderListener>);
    entity.set_listener(listener, mask)
}
