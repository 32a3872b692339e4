// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Listener interfaces the provider calls into.
//!
//! One trait per DDS listener interface (DDS v1.4 Sec.2.2.4.3). Every method
//! receives the handle of the entity the event belongs to plus the status
//! value, and defaults to a no-op so implementors override what they need.
//!
//! # Thread Safety
//!
//! The provider invokes these from threads of its own choosing, possibly
//! several at once for the same listener. Implementations must be
//! `Send + Sync`.

use super::status::{
    InconsistentTopicStatus, LivelinessChangedStatus, LivelinessLostStatus,
    OfferedDeadlineMissedStatus, OfferedIncompatibleQosStatus, PublicationMatchedStatus,
    RequestedDeadlineMissedStatus, RequestedIncompatibleQosStatus, SampleLostStatus,
    SampleRejectedStatus, SubscriptionMatchedStatus,
};
use super::InstanceHandle;

/// Events on a Topic.
pub trait TopicListener: Send + Sync {
    /// Another topic with the same name but a different type was discovered.
    fn on_inconsistent_topic(&self, topic: InstanceHandle, status: InconsistentTopicStatus) {
        let _ = (topic, status);
    }
}

/// Events on a DataWriter.
pub trait DataWriterListener: Send + Sync {
    fn on_offered_deadline_missed(
        &self,
        writer: InstanceHandle,
        status: OfferedDeadlineMissedStatus,
    ) {
        let _ = (writer, status);
    }

    fn on_offered_incompatible_qos(
        &self,
        writer: InstanceHandle,
        status: OfferedIncompatibleQosStatus,
    ) {
        let _ = (writer, status);
    }

    /// Liveliness was not asserted in time (MANUAL_BY_* only).
    fn on_liveliness_lost(&self, writer: InstanceHandle, status: LivelinessLostStatus) {
        let _ = (writer, status);
    }

    fn on_publication_matched(&self, writer: InstanceHandle, status: PublicationMatchedStatus) {
        let _ = (writer, status);
    }
}

/// Events on a DataReader.
pub trait DataReaderListener: Send + Sync {
    fn on_requested_deadline_missed(
        &self,
        reader: InstanceHandle,
        status: RequestedDeadlineMissedStatus,
    ) {
        let _ = (reader, status);
    }

    fn on_requested_incompatible_qos(
        &self,
        reader: InstanceHandle,
        status: RequestedIncompatibleQosStatus,
    ) {
        let _ = (reader, status);
    }

    fn on_sample_rejected(&self, reader: InstanceHandle, status: SampleRejectedStatus) {
        let _ = (reader, status);
    }

    fn on_liveliness_changed(&self, reader: InstanceHandle, status: LivelinessChangedStatus) {
        let _ = (reader, status);
    }

    /// New data can be read or taken. Carries no status value.
    fn on_data_available(&self, reader: InstanceHandle) {
        let _ = reader;
    }

    fn on_subscription_matched(&self, reader: InstanceHandle, status: SubscriptionMatchedStatus) {
        let _ = (reader, status);
    }

    fn on_sample_lost(&self, reader: InstanceHandle, status: SampleLostStatus) {
        let _ = (reader, status);
    }
}

/// Events on a Publisher: the events of all its writers.
pub trait PublisherListener: DataWriterListener {}

/// Events on a Subscriber: the events of all its readers, plus
/// data-on-readers.
pub trait SubscriberListener: DataReaderListener {
    fn on_data_on_readers(&self, subscriber: InstanceHandle) {
        let _ = subscriber;
    }
}

/// Events on a DomainParticipant: every status kind.
pub trait DomainParticipantListener: TopicListener + PublisherListener + SubscriberListener {}
