// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity operations the provider exposes to the boundary.
//!
//! Each method returns the provider's own [`ReturnCode`]; the bridge forwards
//! it without interpretation.

use std::sync::Arc;

use super::listener::{
    DataReaderListener, DataWriterListener, DomainParticipantListener, PublisherListener,
    SubscriberListener, TopicListener,
};
use super::qos::{
    DataReaderQos, DataWriterQos, DomainParticipantQos, PublisherQos, SubscriberQos, TopicQos,
};
use super::status::{
    InconsistentTopicStatus, OfferedIncompatibleQosStatus, PublicationMatchedStatus,
    RequestedIncompatibleQosStatus, SampleLostStatus, SubscriptionMatchedStatus,
};
use super::{InstanceHandle, ReturnCode, StatusMask};

/// Common entity surface.
pub trait Entity: Send + Sync {
    fn instance_handle(&self) -> InstanceHandle;
}

pub trait DomainParticipant: Entity {
    fn get_qos(&self) -> Result<DomainParticipantQos, ReturnCode>;
    fn set_qos(&self, qos: DomainParticipantQos) -> ReturnCode;
    fn set_listener(
        &self,
        listener: Option<Arc<dyn DomainParticipantListener>>,
        mask: StatusMask,
    ) -> ReturnCode;
    fn get_discovered_participants(&self) -> Result<Vec<InstanceHandle>, ReturnCode>;
    fn get_discovered_topic_names(&self) -> Result<Vec<String>, ReturnCode>;
}

pub trait Topic: Entity {
    fn get_qos(&self) -> Result<TopicQos, ReturnCode>;
    fn set_qos(&self, qos: TopicQos) -> ReturnCode;
    fn set_listener(&self, listener: Option<Arc<dyn TopicListener>>, mask: StatusMask)
        -> ReturnCode;
    fn get_name(&self) -> String;
    fn get_type_name(&self) -> String;
    fn get_inconsistent_topic_status(&self) -> Result<InconsistentTopicStatus, ReturnCode>;
}

pub trait Publisher: Entity {
    fn get_qos(&self) -> Result<PublisherQos, ReturnCode>;
    fn set_qos(&self, qos: PublisherQos) -> ReturnCode;
    fn set_listener(
        &self,
        listener: Option<Arc<dyn PublisherListener>>,
        mask: StatusMask,
    ) -> ReturnCode;
}

pub trait Subscriber: Entity {
    fn get_qos(&self) -> Result<SubscriberQos, ReturnCode>;
    fn set_qos(&self, qos: SubscriberQos) -> ReturnCode;
    fn set_listener(
        &self,
        listener: Option<Arc<dyn SubscriberListener>>,
        mask: StatusMask,
    ) -> ReturnCode;
}

pub trait DataWriter: Entity {
    fn get_qos(&self) -> Result<DataWriterQos, ReturnCode>;
    fn set_qos(&self, qos: DataWriterQos) -> ReturnCode;
    fn set_listener(
        &self,
        listener: Option<Arc<dyn DataWriterListener>>,
        mask: StatusMask,
    ) -> ReturnCode;
    fn get_matched_subscriptions(&self) -> Result<Vec<InstanceHandle>, ReturnCode>;
    fn get_offered_incompatible_qos_status(
        &self,
    ) -> Result<OfferedIncompatibleQosStatus, ReturnCode>;
    fn get_publication_matched_status(&self) -> Result<PublicationMatchedStatus, ReturnCode>;
}

pub trait DataReader: Entity {
    fn get_qos(&self) -> Result<DataReaderQos, ReturnCode>;
    fn set_qos(&self, qos: DataReaderQos) -> ReturnCode;
    fn set_listener(
        &self,
        listener: Option<Arc<dyn DataReaderListener>>,
        mask: StatusMask,
    ) -> ReturnCode;
    fn get_matched_publications(&self) -> Result<Vec<InstanceHandle>, ReturnCode>;
    fn get_requested_incompatible_qos_status(
        &self,
    ) -> Result<RequestedIncompatibleQosStatus, ReturnCode>;
    fn get_sample_lost_status(&self) -> Result<SampleLostStatus, ReturnCode>;
    fn get_subscription_matched_status(&self) -> Result<SubscriptionMatchedStatus, ReturnCode>;
}
