// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Publisher listener bridge.
//!
//! Receives the writer events of every writer of the publisher that has no
//! listener of its own.

use std::sync::Arc;

use super::callbacks::HddsPublisherListenerCallbacks;
use super::ListenerBridge;
use crate::dispatch::{ListenerCore, ListenerEvent};
use crate::native::status::{
    LivelinessLostStatus, OfferedDeadlineMissedStatus, OfferedIncompatibleQosStatus,
    PublicationMatchedStatus,
};
use crate::native::{DataWriterListener, InstanceHandle, PublisherListener, ReturnCode, StatusMask};
use crate::runtime::{BridgeRuntime, HddsRuntime};

/// Opaque handle to a publisher listener.
#[repr(C)]
pub struct HddsPublisherListener {
    _private: [u8; 0],
}

pub struct PublisherListenerBridge {
    core: ListenerCore<HddsPublisherListenerCallbacks>,
}

impl ListenerBridge for PublisherListenerBridge {
    type Callbacks = HddsPublisherListenerCallbacks;

    fn from_core(core: ListenerCore<Self::Callbacks>) -> Self {
        Self { core }
    }

    fn core(&self) -> &ListenerCore<Self::Callbacks> {
        &self.core
    }
}

impl DataWriterListener for PublisherListenerBridge {
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

impl PublisherListener for PublisherListenerBridge {}

impl Drop for PublisherListenerBridge {
    fn drop(&mut self) {
        self.core.dispose();
    }
}

/// Create a publisher listener. The callback table is copied.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `callbacks` must point to an initialized table; its slots and
///   `user_data` must stay valid until the listener is disposed.
///
/// # Returns
/// The listener handle, or NULL if an argument is NULL.
#[no_mangle]
pub unsafe extern "C" fn hdds_publisher_listener_create(
    runtime: *const HddsRuntime,
    callbacks: *const HddsPublisherListenerCallbacks,
) -> *mut HddsPublisherListener {
    super::create_handle::<PublisherListenerBridge, _>(runtime, callbacks)
}

/// Stop delivering events and wait for running callbacks to return.
///
/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_publisher_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_publisher_listener_dispose(
    listener: *const HddsPublisherListener,
) -> ReturnCode {
    super::dispose_handle::<PublisherListenerBridge, _>(listener)
}

/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_publisher_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_publisher_listener_is_disposed(
    listener: *const HddsPublisherListener,
) -> bool {
    super::is_disposed_handle::<PublisherListenerBridge, _>(listener)
}

/// Dispose the listener and release the caller's handle.
///
/// # Safety
/// - `listener` must be NULL or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn hdds_publisher_listener_destroy(listener: *mut HddsPublisherListener) {
    super::destroy_handle::<PublisherListenerBridge, _>(listener);
}

/// Attach `listener` to a publisher, or detach with NULL.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `listener` must be NULL or a live publisher listener handle.
#[no_mangle]
pub unsafe extern "C" fn hdds_publisher_set_listener(
    runtime: *const HddsRuntime,
    publisher: InstanceHandle,
    listener: *const HddsPublisherListener,
    mask: StatusMask,
) -> ReturnCode {
    let entity = match BridgeRuntime::resolve(runtime)
        .and_then(|rt| rt.registry().publisher(publisher))
    {
        Ok(entity) => entity,
        Err(e) => return e.into(),
    };
    let listener = super::bridge_ref::<PublisherListenerBridge, _>(listener)
        .map(|bridge| Arc::clone(bridge) as Arc<dyn PublisherListener>);
    entity.set_listener(listener, mask)
}
