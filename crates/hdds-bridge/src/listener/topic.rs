// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Topic listener bridge.

use std::sync::Arc;

use super::callbacks::HddsTopicListenerCallbacks;
use super::ListenerBridge;
use crate::dispatch::{ListenerCore, ListenerEvent};
use crate::native::status::InconsistentTopicStatus;
use crate::native::{InstanceHandle, ReturnCode, StatusMask, TopicListener};
use crate::runtime::{BridgeRuntime, HddsRuntime};

/// Opaque handle to a topic listener.
#[repr(C)]
pub struct HddsTopicListener {
    _private: [u8; 0],
}

pub struct TopicListenerBridge {
    core: ListenerCore<HddsTopicListenerCallbacks>,
}

impl ListenerBridge for TopicListenerBridge {
    type Callbacks = HddsTopicListenerCallbacks;

    fn from_core(core: ListenerCore<Self::Callbacks>) -> Self {
        Self { core }
    }

    fn core(&self) -> &ListenerCore<Self::Callbacks> {
        &self.core
    }
}

impl TopicListener for TopicListenerBridge {
    fn on_inconsistent_topic(&self, topic: InstanceHandle, status: InconsistentTopicStatus) {
        self.core.dispatch(topic, ListenerEvent::InconsistentTopic(status));
    }
}

impl Drop for TopicListenerBridge {
    fn drop(&mut self) {
        self.core.dispose();
    }
}

/// Create a topic listener. The callback table is copied.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `callbacks` must point to an initialized table; its slots and
///   `user_data` must stay valid until the listener is disposed.
///
/// # Returns
/// The listener handle, or NULL if an argument is NULL.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_listener_create(
    runtime: *const HddsRuntime,
    callbacks: *const HddsTopicListenerCallbacks,
) -> *mut HddsTopicListener {
    super::create_handle::<TopicListenerBridge, _>(runtime, callbacks)
}

/// Stop delivering events and wait for running callbacks to return.
///
/// Idempotent. When called from inside one of this listener's callbacks it
/// returns without waiting.
///
/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_topic_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_listener_dispose(
    listener: *const HddsTopicListener,
) -> ReturnCode {
    super::dispose_handle::<TopicListenerBridge, _>(listener)
}

/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_topic_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_listener_is_disposed(
    listener: *const HddsTopicListener,
) -> bool {
    super::is_disposed_handle::<TopicListenerBridge, _>(listener)
}

/// Dispose the listener and release the caller's handle.
///
/// # Safety
/// - `listener` must be NULL or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_listener_destroy(listener: *mut HddsTopicListener) {
    super::destroy_handle::<TopicListenerBridge, _>(listener);
}

/// Attach `listener` to a topic, or detach with NULL.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `listener` must be NULL or a live topic listener handle.
///
/// # Returns
/// The provider's return code; `BAD_PARAMETER` for a NULL runtime or an
/// unknown topic handle.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_set_listener(
    runtime: *const HddsRuntime,
    topic: InstanceHandle,
    listener: *const HddsTopicListener,
    mask: StatusMask,
) -> ReturnCode {
    let topic = match BridgeRuntime::resolve(runtime).and_then(|rt| rt.registry().topic(topic)) {
        Ok(topic) => topic,
        Err(e) => return e.into(),
    };
    let listener = super::bridge_ref::<TopicListenerBridge, _>(listener)
        .map(|bridge| Arc::clone(bridge) as Arc<dyn TopicListener>);
    topic.set_listener(listener, mask)
}
