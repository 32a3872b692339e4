// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Subscriber listener bridge.
//!
//! Reader events of readers without their own listener, plus
//! DATA_ON_READERS for the subscriber itself.

use std::sync::Arc;

use super::callbacks::HddsSubscriberListenerCallbacks;
use super::ListenerBridge;
use crate::dispatch::{ListenerCore, ListenerEvent};
use crate::native::status::{
    LivelinessChangedStatus, RequestedDeadlineMissedStatus, RequestedIncompatibleQosStatus,
    SampleLostStatus, SampleRejectedStatus, SubscriptionMatchedStatus,
};
use crate::native::{DataReaderListener, InstanceHandle, ReturnCode, StatusMask, SubscriberListener};
use crate::runtime::{BridgeRuntime, HddsRuntime};

/// Opaque handle to a subscriber listener.
#[repr(C)]
pub struct HddsSubscriberListener {
    _private: [u8; 0],
}

pub struct SubscriberListenerBridge {
    core: ListenerCore<HddsSubscriberListenerCallbacks>,
}

impl ListenerBridge for SubscriberListenerBridge {
    type Callbacks = HddsSubscriberListenerCallbacks;

    fn from_core(core: ListenerCore<Self::Callbacks>) -> Self {
        Self { core }
    }

    fn core(&self) -> &ListenerCore<Self::Callbacks> {
        &self.core
    }
}

impl DataReaderListener for SubscriberListenerBridge {
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

impl SubscriberListener for SubscriberListenerBridge {
    fn on_data_on_readers(&self, subscriber: InstanceHandle) {
        self.core.dispatch(subscriber, ListenerEvent::DataOnReaders);
    }
}

impl Drop for SubscriberListenerBridge {
    fn drop(&mut self) {
        self.core.dispose();
    }
}

/// Create a subscriber listener. The callback table is copied.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `callbacks` must point to an initialized table; its slots and
///   `user_data` must stay valid until the listener is disposed.
///
/// # Returns
/// The listener handle, or NULL if an argument is NULL.
#[no_mangle]
pub unsafe extern "C" fn hdds_subscriber_listener_create(
    runtime: *const HddsRuntime,
    callbacks: *const HddsSubscriberListenerCallbacks,
) -> *mut HddsSubscriberListener {
    super::create_handle::<SubscriberListenerBridge, _>(runtime, callbacks)
}

/// Stop delivering events and wait for running callbacks to return.
///
/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_subscriber_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_subscriber_listener_dispose(
    listener: *const HddsSubscriberListener,
) -> ReturnCode {
    super::dispose_handle::<SubscriberListenerBridge, _>(listener)
}

/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_subscriber_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_subscriber_listener_is_disposed(
    listener: *const HddsSubscriberListener,
) -> bool {
    super::is_disposed_handle::<SubscriberListenerBridge, _>(listener)
}

/// Dispose the listener and release the caller's handle.
///
/// # Safety
/// - `listener` must be NULL or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn hdds_subscriber_listener_destroy(listener: *mut HddsSubscriberListener) {
    super::destroy_handle::<SubscriberListenerBridge, _>(listener);
}

/// Attach `listener` to a subscriber, or detach with NULL.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `listener` must be NULL or a live subscriber listener handle.
#[no_mangle]
pub unsafe extern "C" fn hdds_subscriber_set_listener(
    runtime: *const HddsRuntime,
    subscriber: InstanceHandle,
    listener: *const HddsSubscriberListener,
    mask: StatusMask,
) -> ReturnCode {
    let entity = match BridgeRuntime::resolve(runtime)
        .and_then(|rt| rt.registry().subscriber(subscriber))
    {
        Ok(entity) => entity,
        Err(e) => return e.into(),
    };
    let listener = super::bridge_ref::<SubscriberListenerBridge, _>(listener)
        .map(|bridge| Arc::clone(bridge) as Arc<dyn SubscriberListener>);
    entity.set_listener(listener, mask)
}
