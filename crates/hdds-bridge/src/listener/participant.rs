// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Domain participant listener bridge.
//!
//! The catch-all listener: every status kind of every entity of the
//! participant that is not handled by a more specific listener.

use std::sync::Arc;

use super::callbacks::HddsParticipantListenerCallbacks;
use super::ListenerBridge;
use crate::dispatch::{ListenerCore, ListenerEvent};
use crate::native::status::{
    InconsistentTopicStatus, LivelinessChangedStatus, LivelinessLostStatus,
    OfferedDeadlineMissedStatus, OfferedIncompatibleQosStatus, PublicationMatchedStatus,
    RequestedDeadlineMissedStatus, RequestedIncompatibleQosStatus, SampleLostStatus,
    SampleRejectedStatus, SubscriptionMatchedStatus,
};
use crate::native::{
    DataReaderListener, DataWriterListener, DomainParticipantListener, InstanceHandle,
    PublisherListener, ReturnCode, StatusMask, SubscriberListener, TopicListener,
};
use crate::runtime::{BridgeRuntime, HddsRuntime};

/// Opaque handle to a domain participant listener.
#[repr(C)]
pub struct HddsParticipantListener {
    _private: [u8; 0],
}

pub struct ParticipantListenerBridge {
    core: ListenerCore<HddsParticipantListenerCallbacks>,
}

impl ListenerBridge for ParticipantListenerBridge {
    type Callbacks = HddsParticipantListenerCallbacks;

    fn from_core(core: ListenerCore<Self::Callbacks>) -> Self {
        Self { core }
    }

    fn core(&self) -> &ListenerCore<Self::Callbacks> {
        &self.core
    }
}

impl TopicListener for ParticipantListenerBridge {
    fn on_inconsistent_topic(&self, topic: InstanceHandle, status: InconsistentTopicStatus) {
        self.core.dispatch(topic, ListenerEvent::InconsistentTopic(status));
    }
}

impl DataWriterListener for ParticipantListenerBridge {
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

impl DataReaderListener for ParticipantListenerBridge {
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

impl PublisherListener for ParticipantListenerBridge {}

impl SubscriberListener for ParticipantListenerBridge {
    fn on_data_on_readers(&self, subscriber: InstanceHandle) {
        self.core.dispatch(subscriber, ListenerEvent::DataOnReaders);
    }
}

impl DomainParticipantListener for ParticipantListenerBridge {}

impl Drop for ParticipantListenerBridge {
    fn drop(&mut self) {
        self.core.dispose();
    }
}

/// Create a domain participant listener. The callback table is copied.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `callbacks` must point to an initialized table; its slots and
///   `user_data` must stay valid until the listener is disposed.
///
/// # Returns
/// The listener handle, or NULL if an argument is NULL.
#[no_mangle]
pub unsafe extern "C" fn hdds_participant_listener_create(
    runtime: *const HddsRuntime,
    callbacks: *const HddsParticipantListenerCallbacks,
) -> *mut HddsParticipantListener {
    super::create_handle::<ParticipantListenerBridge, _>(runtime, callbacks)
}

/// Stop delivering events and wait for running callbacks to return.
///
/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_participant_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_participant_listener_dispose(
    listener: *const HddsParticipantListener,
) -> ReturnCode {
    super::dispose_handle::<ParticipantListenerBridge, _>(listener)
}

/// # Safety
/// - `listener` must be NULL or a live handle from `hdds_participant_listener_create`.
#[no_mangle]
pub unsafe extern "C" fn hdds_participant_listener_is_disposed(
    listener: *const HddsParticipantListener,
) -> bool {
    super::is_disposed_handle::<ParticipantListenerBridge, _>(listener)
}

/// Dispose the listener and release the caller's handle.
///
/// # Safety
/// - `listener` must be NULL or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn hdds_participant_listener_destroy(listener: *mut HddsParticipantListener) {
    super::destroy_handle::<ParticipantListenerBridge, _>(listener);
}

/// Attach `listener` to a domain participant, or detach with NULL.
///
/// # Safety
/// - `runtime` must be a live runtime handle.
/// - `listener` must be NULL or a live domain participant listener handle.
#[no_mangle]
pub unsafe extern "C" fn hdds_domain_participant_set_listener(
    runtime: *const HddsRuntime,
    participant: InstanceHandle,
    listener: *const HddsParticipantListener,
    mask: StatusMask,
) -> ReturnCode {
    let entity = match BridgeRuntime::resolve(runtime)
        .and_then(|rt| rt.registry().participant(participant))
    {
        Ok(entity) => entity,
        Err(e) => return e.into(),
    };
    let listener = super::bridge_ref::<ParticipantListenerBridge, _>(listener)
        .map(|bridge| Arc::clone(bridge) as Arc<dyn DomainParticipantListener>);
    entity.set_listener(listener, mask)
}
