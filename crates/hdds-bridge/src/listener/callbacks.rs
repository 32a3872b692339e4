// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! C callback tables.
//!
//! Slots are grouped by the listener interface they come from, and each
//! listener kind embeds the groups it inherits. Any slot left NULL is skipped
//! without a hop to the executor. `user_data` is passed to every slot.
//!
//! Status pointers handed to a slot are borrowed for the duration of the call
//! only. Copy what you need before returning; never release them.

use std::os::raw::c_void;

use crate::codec::Scoped;
use crate::dispatch::{CallbackTable, ListenerEvent};
use crate::native::{InstanceHandle, StatusKind};
use crate::status::{
    HddsInconsistentTopicStatus, HddsLivelinessChangedStatus, HddsLivelinessLostStatus,
    HddsOfferedDeadlineMissedStatus, HddsOfferedIncompatibleQosStatus,
    HddsPublicationMatchedStatus, HddsRequestedDeadlineMissedStatus,
    HddsRequestedIncompatibleQosStatus, HddsSampleLostStatus, HddsSampleRejectedStatus,
    HddsSubscriptionMatchedStatus,
};

// =============================================================================
// Slot types
// =============================================================================

pub type HddsOnInconsistentTopic = Option<
    unsafe extern "C" fn(
        topic: InstanceHandle,
        status: *const HddsInconsistentTopicStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnOfferedDeadlineMissed = Option<
    unsafe extern "C" fn(
        writer: InstanceHandle,
        status: *const HddsOfferedDeadlineMissedStatus,
        user_data: *mut c_void,
    ),
>;

/// `status->policies` is only valid during the call.
pub type HddsOnOfferedIncompatibleQos = Option<
    unsafe extern "C" fn(
        writer: InstanceHandle,
        status: *const HddsOfferedIncompatibleQosStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnLivelinessLost = Option<
    unsafe extern "C" fn(
        writer: InstanceHandle,
        status: *const HddsLivelinessLostStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnPublicationMatched = Option<
    unsafe extern "C" fn(
        writer: InstanceHandle,
        status: *const HddsPublicationMatchedStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnRequestedDeadlineMissed = Option<
    unsafe extern "C" fn(
        reader: InstanceHandle,
        status: *const HddsRequestedDeadlineMissedStatus,
        user_data: *mut c_void,
    ),
>;

/// `status->policies` is only valid during the call.
pub type HddsOnRequestedIncompatibleQos = Option<
    unsafe extern "C" fn(
        reader: InstanceHandle,
        status: *const HddsRequestedIncompatibleQosStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnSampleRejected = Option<
    unsafe extern "C" fn(
        reader: InstanceHandle,
        status: *const HddsSampleRejectedStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnLivelinessChanged = Option<
    unsafe extern "C" fn(
        reader: InstanceHandle,
        status: *const HddsLivelinessChangedStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnDataAvailable =
    Option<unsafe extern "C" fn(reader: InstanceHandle, user_data: *mut c_void)>;

pub type HddsOnSubscriptionMatched = Option<
    unsafe extern "C" fn(
        reader: InstanceHandle,
        status: *const HddsSubscriptionMatchedStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnSampleLost = Option<
    unsafe extern "C" fn(
        reader: InstanceHandle,
        status: *const HddsSampleLostStatus,
        user_data: *mut c_void,
    ),
>;

pub type HddsOnDataOnReaders =
    Option<unsafe extern "C" fn(subscriber: InstanceHandle, user_data: *mut c_void)>;

// =============================================================================
// Slot groups
// =============================================================================

/// Topic listener slots.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct HddsTopicCallbacks {
    pub on_inconsistent_topic: HddsOnInconsistentTopic,
}

impl HddsTopicCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        kind == StatusKind::InconsistentTopic && self.on_inconsistent_topic.is_some()
    }

    /// Returns false when `event` does not belong to this group.
    unsafe fn invoke(
        &self,
        entity: InstanceHandle,
        event: &ListenerEvent,
        user_data: *mut c_void,
    ) -> bool {
        match event {
            ListenerEvent::InconsistentTopic(status) => {
                if let Some(cb) = self.on_inconsistent_topic {
                    cb(entity, status, user_data);
                }
                true
            }
            _ => false,
        }
    }
}

/// Data writer listener slots.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct HddsDataWriterCallbacks {
    pub on_offered_deadline_missed: HddsOnOfferedDeadlineMissed,
    pub on_offered_incompatible_qos: HddsOnOfferedIncompatibleQos,
    pub on_liveliness_lost: HddsOnLivelinessLost,
    pub on_publication_matched: HddsOnPublicationMatched,
}

impl HddsDataWriterCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        match kind {
            StatusKind::OfferedDeadlineMissed => self.on_offered_deadline_missed.is_some(),
            StatusKind::OfferedIncompatibleQos => self.on_offered_incompatible_qos.is_some(),
            StatusKind::LivelinessLost => self.on_liveliness_lost.is_some(),
            StatusKind::PublicationMatched => self.on_publication_matched.is_some(),
            _ => false,
        }
    }

    unsafe fn invoke(
        &self,
        entity: InstanceHandle,
        event: &ListenerEvent,
        user_data: *mut c_void,
    ) -> bool {
        match event {
            ListenerEvent::OfferedDeadlineMissed(status) => {
                if let Some(cb) = self.on_offered_deadline_missed {
                    cb(entity, status, user_data);
                }
            }
            ListenerEvent::OfferedIncompatibleQos(status) => {
                if let Some(cb) = self.on_offered_incompatible_qos {
                    let wrapper =
                        Scoped::new(HddsOfferedIncompatibleQosStatus::from_native(status));
                    cb(entity, wrapper.as_ptr(), user_data);
                }
            }
            ListenerEvent::LivelinessLost(status) => {
                if let Some(cb) = self.on_liveliness_lost {
                    cb(entity, status, user_data);
                }
            }
            ListenerEvent::PublicationMatched(status) => {
                if let Some(cb) = self.on_publication_matched {
                    cb(entity, status, user_data);
                }
            }
            _ => return false,
        }
        true
    }
}

/// Data reader listener slots.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct HddsDataReaderCallbacks {
    pub on_requested_deadline_missed: HddsOnRequestedDeadlineMissed,
    pub on_requested_incompatible_qos: HddsOnRequestedIncompatibleQos,
    pub on_sample_rejected: HddsOnSampleRejected,
    pub on_liveliness_changed: HddsOnLivelinessChanged,
    pub on_data_available: HddsOnDataAvailable,
    pub on_subscription_matched: HddsOnSubscriptionMatched,
    pub on_sample_lost: HddsOnSampleLost,
}

impl HddsDataReaderCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        match kind {
            StatusKind::RequestedDeadlineMissed => self.on_requested_deadline_missed.is_some(),
            StatusKind::RequestedIncompatibleQos => self.on_requested_incompatible_qos.is_some(),
            StatusKind::SampleRejected => self.on_sample_rejected.is_some(),
            StatusKind::LivelinessChanged => self.on_liveliness_changed.is_some(),
            StatusKind::DataAvailable => self.on_data_available.is_some(),
            StatusKind::SubscriptionMatched => self.on_subscription_matched.is_some(),
            StatusKind::SampleLost => self.on_sample_lost.is_some(),
            _ => false,
        }
    }

    unsafe fn invoke(
        &self,
        entity: InstanceHandle,
        event: &ListenerEvent,
        user_data: *mut c_void,
    ) -> bool {
        match event {
            ListenerEvent::RequestedDeadlineMissed(status) => {
                if let Some(cb) = self.on_requested_deadline_missed {
                    cb(entity, status, user_data);
                }
            }
            ListenerEvent::RequestedIncompatibleQos(status) => {
                if let Some(cb) = self.on_requested_incompatible_qos {
                    let wrapper =
                        Scoped::new(HddsRequestedIncompatibleQosStatus::from_native(status));
                    cb(entity, wrapper.as_ptr(), user_data);
                }
            }
            ListenerEvent::SampleRejected(status) => {
                if let Some(cb) = self.on_sample_rejected {
                    cb(entity, status, user_data);
                }
            }
            ListenerEvent::LivelinessChanged(status) => {
                if let Some(cb) = self.on_liveliness_changed {
                    cb(entity, status, user_data);
                }
            }
            ListenerEvent::DataAvailable => {
                if let Some(cb) = self.on_data_available {
                    cb(entity, user_data);
                }
            }
            ListenerEvent::SubscriptionMatched(status) => {
                if let Some(cb) = self.on_subscription_matched {
                    cb(entity, status, user_data);
                }
            }
            ListenerEvent::SampleLost(status) => {
                if let Some(cb) = self.on_sample_lost {
                    cb(entity, status, user_data);
                }
            }
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Listener tables
// =============================================================================

/// Callbacks of a topic listener.
///
/// # Example (C)
///
/// ```c
/// HddsTopicListenerCallbacks cbs = {0};
/// cbs.topic.on_inconsistent_topic = my_on_inconsistent;
/// cbs.user_data = my_context;
/// HddsTopicListener* l = hdds_topic_listener_create(rt, &cbs);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HddsTopicListenerCallbacks {
    pub topic: HddsTopicCallbacks,
    pub user_data: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HddsDataWriterListenerCallbacks {
    pub writer: HddsDataWriterCallbacks,
    pub user_data: *mut c_void,
}

/// Callbacks of a publisher listener (writer events of all its writers).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HddsPublisherListenerCallbacks {
    pub writer: HddsDataWriterCallbacks,
    pub user_data: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HddsDataReaderListenerCallbacks {
    pub reader: HddsDataReaderCallbacks,
    pub user_data: *mut c_void,
}

/// Callbacks of a subscriber listener.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HddsSubscriberListenerCallbacks {
    pub reader: HddsDataReaderCallbacks,
    pub on_data_on_readers: HddsOnDataOnReaders,
    pub user_data: *mut c_void,
}

/// Callbacks of a domain participant listener: every entity event.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HddsParticipantListenerCallbacks {
    pub topic: HddsTopicCallbacks,
    pub writer: HddsDataWriterCallbacks,
    pub reader: HddsDataReaderCallbacks,
    pub on_data_on_readers: HddsOnDataOnReaders,
    pub user_data: *mut c_void,
}

// SAFETY: the caller guarantees that slots and user_data may be used from the
// executor's worker threads until the listener is disposed.
unsafe impl Send for HddsTopicListenerCallbacks {}
unsafe impl Send for HddsDataWriterListenerCallbacks {}
unsafe impl Send for HddsPublisherListenerCallbacks {}
unsafe impl Send for HddsDataReaderListenerCallbacks {}
unsafe impl Send for HddsSubscriberListenerCallbacks {}
unsafe impl Send for HddsParticipantListenerCallbacks {}

fn unhandled(entity: InstanceHandle, event: &ListenerEvent) {
    log::warn!(
        "[hdds-bridge] {} on {} has no slot in this listener kind",
        event.kind().name(),
        entity
    );
}

impl CallbackTable for HddsTopicListenerCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        self.topic.has_slot(kind)
    }

    unsafe fn invoke(&self, entity: InstanceHandle, event: ListenerEvent) {
        if !self.topic.invoke(entity, &event, self.user_data) {
            unhandled(entity, &event);
        }
    }
}

impl CallbackTable for HddsDataWriterListenerCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        self.writer.has_slot(kind)
    }

    unsafe fn invoke(&self, entity: InstanceHandle, event: ListenerEvent) {
        if !self.writer.invoke(entity, &event, self.user_data) {
            unhandled(entity, &event);
        }
    }
}

impl CallbackTable for HddsPublisherListenerCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        self.writer.has_slot(kind)
    }

    unsafe fn invoke(&self, entity: InstanceHandle, event: ListenerEvent) {
        if !self.writer.invoke(entity, &event, self.user_data) {
            unhandled(entity, &event);
        }
    }
}

impl CallbackTable for HddsDataReaderListenerCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        self.reader.has_slot(kind)
    }

    unsafe fn invoke(&self, entity: InstanceHandle, event: ListenerEvent) {
        if !self.reader.invoke(entity, &event, self.user_data) {
            unhandled(entity, &event);
        }
    }
}

impl CallbackTable for HddsSubscriberListenerCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        match kind {
            StatusKind::DataOnReaders => self.on_data_on_readers.is_some(),
            _ => self.reader.has_slot(kind),
        }
    }

    unsafe fn invoke(&self, entity: InstanceHandle, event: ListenerEvent) {
        if let ListenerEvent::DataOnReaders = event {
            if let Some(cb) = self.on_data_on_readers {
                cb(entity, self.user_data);
            }
            return;
        }
        if !self.reader.invoke(entity, &event, self.user_data) {
            unhandled(entity, &event);
        }
    }
}

impl CallbackTable for HddsParticipantListenerCallbacks {
    fn has_slot(&self, kind: StatusKind) -> bool {
        match kind {
            StatusKind::DataOnReaders => self.on_data_on_readers.is_some(),
            _ => {
                self.topic.has_slot(kind)
                    || self.writer.has_slot(kind)
                    || self.reader.has_slot(kind)
            }
        }
    }

    unsafe fn invoke(&self, entity: InstanceHandle, event: ListenerEvent) {
        if let ListenerEvent::DataOnReaders = event {
            if let Some(cb) = self.on_data_on_readers {
                cb(entity, self.user_data);
            }
            return;
        }
        let handled = self.topic.invoke(entity, &event, self.user_data)
            || self.writer.invoke(entity, &event, self.user_data)
            || self.reader.invoke(entity, &event, self.user_data);
        if !handled {
            unhandled(entity, &event);
        }
    }
}
