// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Listener bridges.
//!
//! A bridge implements the provider's listener trait for one listener kind
//! and forwards every call to a [`ListenerCore`] holding the caller's
//! callback table. The caller receives an opaque handle to a reference
//! counted bridge; the provider holds its own reference once the listener is
//! attached with `hdds_<entity>_set_listener`.
//!
//! # Lifecycle
//!
//! ```text
//! create ──► set_listener(entity, l) ──► events ──► dispose ──► destroy
//!                                                     │
//!                                         no slot runs after this returns
//! ```
//!
//! `destroy` disposes first, then drops the caller's reference. The provider
//! may keep the bridge alive longer; a disposed bridge silently drops events.
//!
//! # Thread Safety
//!
//! Slots run on the runtime's executor workers, never on provider threads.
//! `dispose` may be called from any thread:
//!
//! - Off the executor it waits until every counted call has returned.
//! - From inside a slot (of this or another listener) it waits for slots of
//!   the disposed listener running on other workers. Calls still queued are
//!   dropped before reaching their slot. The only slots of the disposed
//!   listener that may still be executing when it returns are those on the
//!   caller's own stack, which finish normally.
//!
//! In both cases no slot of the listener starts after `dispose` returns.

pub mod callbacks;
pub mod participant;
pub mod publisher;
pub mod reader;
pub mod subscriber;
pub mod topic;
pub mod writer;

use std::sync::Arc;

use crate::dispatch::{CallbackTable, ListenerCore};
use crate::native::ReturnCode;
use crate::runtime::{BridgeRuntime, HddsRuntime};

pub use callbacks::{
    HddsDataReaderCallbacks, HddsDataReaderListenerCallbacks, HddsDataWriterCallbacks,
    HddsDataWriterListenerCallbacks, HddsParticipantListenerCallbacks,
    HddsPublisherListenerCallbacks, HddsSubscriberListenerCallbacks, HddsTopicCallbacks,
    HddsTopicListenerCallbacks,
};
pub use participant::{HddsParticipantListener, ParticipantListenerBridge};
pub use publisher::{HddsPublisherListener, PublisherListenerBridge};
pub use reader::{DataReaderListenerBridge, HddsDataReaderListener};
pub use subscriber::{HddsSubscriberListener, SubscriberListenerBridge};
pub use topic::{HddsTopicListener, TopicListenerBridge};
pub use writer::{DataWriterListenerBridge, HddsDataWriterListener};

/// A listener kind backed by a [`ListenerCore`].
pub trait ListenerBridge: Send + Sync + Sized + 'static {
    type Callbacks: CallbackTable;

    fn from_core(core: ListenerCore<Self::Callbacks>) -> Self;

    fn core(&self) -> &ListenerCore<Self::Callbacks>;

    /// Build a bridge dispatching through `runtime`'s executor.
    fn new(runtime: &BridgeRuntime, callbacks: Self::Callbacks) -> Arc<Self> {
        Arc::new(Self::from_core(ListenerCore::new(
            callbacks,
            Arc::clone(runtime.executor()),
        )))
    }

    fn dispose(&self) {
        self.core().dispose();
    }

    fn is_disposed(&self) -> bool {
        self.core().is_disposed()
    }
}

// Handles are `Box<Arc<B>>` behind an opaque pointer type `H`.

pub(crate) unsafe fn create_handle<B: ListenerBridge, H>(
    runtime: *const HddsRuntime,
    callbacks: *const B::Callbacks,
) -> *mut H {
    let Some(runtime) = BridgeRuntime::from_handle(runtime) else {
        log::warn!("[hdds-bridge] listener create: null runtime");
        return std::ptr::null_mut();
    };
    let Some(callbacks) = callbacks.as_ref() else {
        log::warn!("[hdds-bridge] listener create: null callbacks");
        return std::ptr::null_mut();
    };
    Box::into_raw(Box::new(B::new(runtime, *callbacks))).cast::<H>()
}

pub(crate) unsafe fn bridge_ref<'a, B: ListenerBridge, H>(
    listener: *const H,
) -> Option<&'a Arc<B>> {
    listener.cast::<Arc<B>>().as_ref()
}

pub(crate) unsafe fn dispose_handle<B: ListenerBridge, H>(listener: *const H) -> ReturnCode {
    match bridge_ref::<B, H>(listener) {
        Some(bridge) => {
            bridge.dispose();
            ReturnCode::Ok
        }
        None => ReturnCode::BadParameter,
    }
}

/// Null reads as disposed.
pub(crate) unsafe fn is_disposed_handle<B: ListenerBridge, H>(listener: *const H) -> bool {
    bridge_ref::<B, H>(listener).map_or(true, |bridge| bridge.is_disposed())
}

pub(crate) unsafe fn destroy_handle<B: ListenerBridge, H>(listener: *mut H) {
    if listener.is_null() {
        return;
    }
    let bridge = Box::from_raw(listener.cast::<Arc<B>>());
    bridge.dispose();
}
