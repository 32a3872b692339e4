// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Listener event dispatch.
//!
//! Every provider listener call becomes one [`ListenerEvent`] and goes
//! through [`ListenerCore::dispatch`]:
//!
//! ```text
//! provider thread                     executor worker
//! ---------------                     ---------------
//! lock state
//!   disposed?  -> return
//!   slot null? -> return
//!   copy table, in_flight += 1
//! unlock
//! run_blocking(job) ───────────────►  lock state
//!   (blocks)                            disposed? -> skip
//!                                       record this thread as running
//!                                     unlock
//!                                     wrap status, call slot, free wrapper
//!                 ◄───────────────    unrecord (notify)
//! in_flight -= 1 (notify at 0)
//! ```
//!
//! `dispose()` flips `disposed` under the same lock. A call that is counted
//! but not yet running sees the flag on the worker and never reaches the
//! slot. From a non-worker thread `dispose()` then waits for `in_flight` to
//! reach zero. On a worker it waits until no other thread is inside a slot
//! of this listener; slots running on the calling thread (the callback that
//! is disposing, and any it is nested in) are not waited for. Either way,
//! once it returns no slot of that listener will start again, and only the
//! calling thread's own slots may still be on the stack.

pub mod executor;

use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};

use crate::native::status::{
    InconsistentTopicStatus, LivelinessChangedStatus, LivelinessLostStatus,
    OfferedDeadlineMissedStatus, OfferedIncompatibleQosStatus, PublicationMatchedStatus,
    RequestedDeadlineMissedStatus, RequestedIncompatibleQosStatus, SampleLostStatus,
    SampleRejectedStatus, SubscriptionMatchedStatus,
};
use crate::native::{InstanceHandle, StatusKind};

pub use executor::CallbackExecutor;

/// One listener notification, as received from the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenerEvent {
    InconsistentTopic(InconsistentTopicStatus),
    OfferedDeadlineMissed(OfferedDeadlineMissedStatus),
    OfferedIncompatibleQos(OfferedIncompatibleQosStatus),
    LivelinessLost(LivelinessLostStatus),
    PublicationMatched(PublicationMatchedStatus),
    RequestedDeadlineMissed(RequestedDeadlineMissedStatus),
    RequestedIncompatibleQos(RequestedIncompatibleQosStatus),
    SampleRejected(SampleRejectedStatus),
    LivelinessChanged(LivelinessChangedStatus),
    DataAvailable,
    SubscriptionMatched(SubscriptionMatchedStatus),
    SampleLost(SampleLostStatus),
    DataOnReaders,
}

impl ListenerEvent {
    pub fn kind(&self) -> StatusKind {
        match self {
            ListenerEvent::InconsistentTopic(_) => StatusKind::InconsistentTopic,
            ListenerEvent::OfferedDeadlineMissed(_) => StatusKind::OfferedDeadlineMissed,
            ListenerEvent::OfferedIncompatibleQos(_) => StatusKind::OfferedIncompatibleQos,
            ListenerEvent::LivelinessLost(_) => StatusKind::LivelinessLost,
            ListenerEvent::PublicationMatched(_) => StatusKind::PublicationMatched,
            ListenerEvent::RequestedDeadlineMissed(_) => StatusKind::RequestedDeadlineMissed,
            ListenerEvent::RequestedIncompatibleQos(_) => StatusKind::RequestedIncompatibleQos,
            ListenerEvent::SampleRejected(_) => StatusKind::SampleRejected,
            ListenerEvent::LivelinessChanged(_) => StatusKind::LivelinessChanged,
            ListenerEvent::DataAvailable => StatusKind::DataAvailable,
            ListenerEvent::SubscriptionMatched(_) => StatusKind::SubscriptionMatched,
            ListenerEvent::SampleLost(_) => StatusKind::SampleLost,
            ListenerEvent::DataOnReaders => StatusKind::DataOnReaders,
        }
    }
}

/// A table of caller callbacks a [`ListenerCore`] can invoke.
pub trait CallbackTable: Copy + Send + 'static {
    /// Whether a non-null slot exists for `kind`.
    fn has_slot(&self, kind: StatusKind) -> bool;

    /// Call the slot for `event`, if any.
    ///
    /// # Safety
    /// Slots and `user_data` must still be valid, i.e. the listener has not
    /// been disposed.
    unsafe fn invoke(&self, entity: InstanceHandle, event: ListenerEvent);
}

struct CoreState<C> {
    disposed: bool,
    /// Calls counted by `dispatch` and not yet returned to the provider.
    in_flight: usize,
    /// One entry per slot currently executing, by thread.
    running: Vec<ThreadId>,
    callbacks: C,
}

impl<C> CoreState<C> {
    fn running_elsewhere(&self, current: ThreadId) -> bool {
        self.running.iter().any(|id| *id != current)
    }
}

struct Shared<C> {
    state: Mutex<CoreState<C>>,
    idle: Condvar,
}

/// Shared dispatch state of one listener.
pub struct ListenerCore<C: CallbackTable> {
    shared: Arc<Shared<C>>,
    executor: Arc<CallbackExecutor>,
}

impl<C: CallbackTable> ListenerCore<C> {
    pub fn new(callbacks: C, executor: Arc<CallbackExecutor>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(CoreState {
                    disposed: false,
                    in_flight: 0,
                    running: Vec::new(),
                    callbacks,
                }),
                idle: Condvar::new(),
            }),
            executor,
        }
    }

    /// Forward one event to the caller's slot.
    ///
    /// Returns after the slot has run (or immediately when disposed or the
    /// slot is null).
    pub fn dispatch(&self, entity: InstanceHandle, event: ListenerEvent) {
        let kind = event.kind();
        let callbacks = {
            let mut state = self.shared.state.lock();
            if state.disposed {
                log::debug!(
                    "[hdds-bridge] {} on {} dropped: listener disposed",
                    kind.name(),
                    entity
                );
                return;
            }
            if !state.callbacks.has_slot(kind) {
                log::trace!("[hdds-bridge] {} on {}: no slot", kind.name(), entity);
                return;
            }
            state.in_flight += 1;
            state.callbacks
        };
        let _in_flight = InFlight(&*self.shared);

        let shared = Arc::clone(&self.shared);
        let result = self.executor.run_blocking(move || {
            let Some(_running) = Running::enter(&*shared) else {
                log::debug!(
                    "[hdds-bridge] {} on {} dropped: disposed while queued",
                    kind.name(),
                    entity
                );
                return;
            };
            // SAFETY: the listener was not disposed when this thread was
            // recorded as running, and dispose() waits for it.
            unsafe { callbacks.invoke(entity, event) }
        });
        if let Err(e) = result {
            log::warn!(
                "[hdds-bridge] {} on {} not delivered: {}",
                kind.name(),
                entity,
                e
            );
        }
    }

    /// Stop dispatching and wait for running calls to finish.
    ///
    /// Idempotent. On an executor worker (from inside a callback) it only
    /// waits for slots running on other threads; queued calls are dropped
    /// without reaching their slot.
    pub fn dispose(&self) {
        let mut state = self.shared.state.lock();
        if !state.disposed {
            state.disposed = true;
            log::debug!(
                "[hdds-bridge] listener disposed ({} call(s) in flight)",
                state.in_flight
            );
        }
        let current = thread::current().id();
        if CallbackExecutor::is_worker_thread() {
            // Queued calls cannot run before this worker is free again.
            while state.running_elsewhere(current) {
                self.shared.idle.wait(&mut state);
            }
        } else {
            while state.in_flight > 0 {
                self.shared.idle.wait(&mut state);
            }
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.state.lock().disposed
    }

    pub fn in_flight(&self) -> usize {
        self.shared.state.lock().in_flight
    }
}

struct InFlight<'a, C>(&'a Shared<C>);

impl<C> Drop for InFlight<'_, C> {
    fn drop(&mut self) {
        let mut state = self.0.state.lock();
        state.in_flight -= 1;
        if state.in_flight == 0 {
            self.0.idle.notify_all();
        }
    }
}

/// Marks the current thread as inside a slot until dropped.
struct Running<'a, C> {
    shared: &'a Shared<C>,
    thread: ThreadId,
}

impl<'a, C> Running<'a, C> {
    /// `None` once the listener is disposed.
    fn enter(shared: &'a Shared<C>) -> Option<Self> {
        let mut state = shared.state.lock();
        if state.disposed {
            return None;
        }
        let thread = thread::current().id();
        state.running.push(thread);
        Some(Self { shared, thread })
    }
}

impl<C> Drop for Running<'_, C> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        if let Some(pos) = state.running.iter().position(|id| *id == self.thread) {
            state.running.swap_remove(pos);
        }
        self.shared.idle.notify_all();
    }
}
