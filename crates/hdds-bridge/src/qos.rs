// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QoS wrapper structs for the C boundary.
//!
//! Each entity QoS has a fixed-layout mirror. Fixed-size policies are copied
//! verbatim; USER_DATA / TOPIC_DATA / GROUP_DATA become flat octet buffers and
//! PARTITION a flat basic-string sequence.
//!
//! A wrapper filled by `hdds_*_get_qos` owns its nested buffers: release them
//! with the matching `hdds_*_qos_release` once done. `set_qos` only reads the
//! wrapper; the provider receives fresh native copies.

use std::os::raw::c_char;
use std::ptr;

use crate::codec::{self, strings, FlatSequence, NestedBuffers, StringSequence};
use crate::error::Result;
use crate::native::qos::{
    DataReaderQos, DataWriterQos, DeadlineQosPolicy, DestinationOrderQosPolicy,
    DomainParticipantQos, DurabilityQosPolicy, EntityFactoryQosPolicy, GroupDataQosPolicy,
    HistoryQosPolicy, LatencyBudgetQosPolicy, LifespanQosPolicy, LivelinessQosPolicy,
    OwnershipQosPolicy, OwnershipStrengthQosPolicy, PartitionQosPolicy, PresentationQosPolicy,
    PublisherQos, ReaderDataLifecycleQosPolicy, ReliabilityQosPolicy, ResourceLimitsQosPolicy,
    SubscriberQos, TimeBasedFilterQosPolicy, TopicDataQosPolicy, TopicQos,
    TransportPriorityQosPolicy, UserDataQosPolicy, WriterDataLifecycleQosPolicy,
};

fn encode_octets(value: &[u8]) -> *mut u8 {
    FlatSequence::encode(value).into_raw()
}

unsafe fn release_octets(value: &mut *mut u8) {
    codec::c_free(*value);
    *value = ptr::null_mut();
}

// =============================================================================
// Variable-length policies
// =============================================================================

/// USER_DATA as a flat octet buffer.
#[repr(C)]
#[derive(Debug)]
pub struct HddsUserDataQosPolicy {
    pub value: *mut u8,
}

impl HddsUserDataQosPolicy {
    pub fn from_native(policy: &UserDataQosPolicy) -> Self {
        Self {
            value: encode_octets(&policy.value),
        }
    }

    /// # Safety
    /// `value` must be null or a valid flat octet buffer.
    pub unsafe fn to_native(&self) -> UserDataQosPolicy {
        UserDataQosPolicy {
            value: codec::decode(self.value),
        }
    }
}

/// TOPIC_DATA as a flat octet buffer.
#[repr(C)]
#[derive(Debug)]
pub struct HddsTopicDataQosPolicy {
    pub value: *mut u8,
}

impl HddsTopicDataQosPolicy {
    pub fn from_native(policy: &TopicDataQosPolicy) -> Self {
        Self {
            value: encode_octets(&policy.value),
        }
    }

    /// # Safety
    /// `value` must be null or a valid flat octet buffer.
    pub unsafe fn to_native(&self) -> TopicDataQosPolicy {
        TopicDataQosPolicy {
            value: codec::decode(self.value),
        }
    }
}

/// GROUP_DATA as a flat octet buffer.
#[repr(C)]
#[derive(Debug)]
pub struct HddsGroupDataQosPolicy {
    pub value: *mut u8,
}

impl HddsGroupDataQosPolicy {
    pub fn from_native(policy: &GroupDataQosPolicy) -> Self {
        Self {
            value: encode_octets(&policy.value),
        }
    }

    /// # Safety
    /// `value` must be null or a valid flat octet buffer.
    pub unsafe fn to_native(&self) -> GroupDataQosPolicy {
        GroupDataQosPolicy {
            value: codec::decode(self.value),
        }
    }
}

/// PARTITION as a flat basic-string sequence.
#[repr(C)]
#[derive(Debug)]
pub struct HddsPartitionQosPolicy {
    pub name: *mut u8,
}

impl HddsPartitionQosPolicy {
    pub fn from_native(policy: &PartitionQosPolicy) -> Result<Self> {
        Ok(Self {
            name: StringSequence::<c_char>::encode(&policy.name)?.into_raw(),
        })
    }

    /// # Safety
    /// `name` must be null or a valid basic-string sequence.
    pub unsafe fn to_native(&self) -> PartitionQosPolicy {
        PartitionQosPolicy {
            name: strings::decode_strings::<c_char>(self.name),
        }
    }

    unsafe fn release(&mut self) {
        strings::release_string_sequence::<c_char>(self.name);
        self.name = ptr::null_mut();
    }
}

// =============================================================================
// Entity QoS
// =============================================================================

#[repr(C)]
#[derive(Debug)]
pub struct HddsDomainParticipantQos {
    pub user_data: HddsUserDataQosPolicy,
    pub entity_factory: EntityFactoryQosPolicy,
}

impl HddsDomainParticipantQos {
    pub fn from_native(qos: &DomainParticipantQos) -> Self {
        Self {
            user_data: HddsUserDataQosPolicy::from_native(&qos.user_data),
            entity_factory: qos.entity_factory,
        }
    }

    /// # Safety
    /// Nested buffers must be null or valid.
    pub unsafe fn to_native(&self) -> DomainParticipantQos {
        DomainParticipantQos {
            user_data: self.user_data.to_native(),
            entity_factory: self.entity_factory,
        }
    }
}

impl NestedBuffers for HddsDomainParticipantQos {
    unsafe fn release_nested(&mut self) {
        release_octets(&mut self.user_data.value);
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct HddsTopicQos {
    pub topic_data: HddsTopicDataQosPolicy,
    pub durability: DurabilityQosPolicy,
    pub deadline: DeadlineQosPolicy,
    pub latency_budget: LatencyBudgetQosPolicy,
    pub liveliness: LivelinessQosPolicy,
    pub reliability: ReliabilityQosPolicy,
    pub destination_order: DestinationOrderQosPolicy,
    pub history: HistoryQosPolicy,
    pub resource_limits: ResourceLimitsQosPolicy,
    pub transport_priority: TransportPriorityQosPolicy,
    pub lifespan: LifespanQosPolicy,
    pub ownership: OwnershipQosPolicy,
}

impl HddsTopicQos {
    pub fn from_native(qos: &TopicQos) -> Self {
        Self {
            topic_data: HddsTopicDataQosPolicy::from_native(&qos.topic_data),
            durability: qos.durability,
            deadline: qos.deadline,
            latency_budget: qos.latency_budget,
            liveliness: qos.liveliness,
            reliability: qos.reliability,
            destination_order: qos.destination_order,
            history: qos.history,
            resource_limits: qos.resource_limits,
            transport_priority: qos.transport_priority,
            lifespan: qos.lifespan,
            ownership: qos.ownership,
        }
    }

    /// # Safety
    /// Nested buffers must be null or valid.
    pub unsafe fn to_native(&self) -> TopicQos {
        TopicQos {
            topic_data: self.topic_data.to_native(),
            durability: self.durability,
            deadline: self.deadline,
            latency_budget: self.latency_budget,
            liveliness: self.liveliness,
            reliability: self.reliability,
            destination_order: self.destination_order,
            history: self.history,
            resource_limits: self.resource_limits,
            transport_priority: self.transport_priority,
            lifespan: self.lifespan,
            ownership: self.ownership,
        }
    }
}

impl NestedBuffers for HddsTopicQos {
    unsafe fn release_nested(&mut self) {
        release_octets(&mut self.topic_data.value);
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct HddsPublisherQos {
    pub presentation: PresentationQosPolicy,
    pub partition: HddsPartitionQosPolicy,
    pub group_data: HddsGroupDataQosPolicy,
    pub entity_factory: EntityFactoryQosPolicy,
}

impl HddsPublisherQos {
    pub fn from_native(qos: &PublisherQos) -> Result<Self> {
        Ok(Self {
            presentation: qos.presentation,
            partition: HddsPartitionQosPolicy::from_native(&qos.partition)?,
            group_data: HddsGroupDataQosPolicy::from_native(&qos.group_data),
            entity_factory: qos.entity_factory,
        })
    }

    /// # Safety
    /// Nested buffers must be null or valid.
    pub unsafe fn to_native(&self) -> PublisherQos {
        PublisherQos {
            presentation: self.presentation,
            partition: self.partition.to_native(),
            group_data: self.group_data.to_native(),
            entity_factory: self.entity_factory,
        }
    }
}

impl NestedBuffers for HddsPublisherQos {
    unsafe fn release_nested(&mut self) {
        self.partition.release();
        release_octets(&mut self.group_data.value);
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct HddsSubscriberQos {
    pub presentation: PresentationQosPolicy,
    pub partition: HddsPartitionQosPolicy,
    pub group_data: HddsGroupDataQosPolicy,
    pub entity_factory: EntityFactoryQosPolicy,
}

impl HddsSubscriberQos {
    pub fn from_native(qos: &SubscriberQos) -> Result<Self> {
        Ok(Self {
            presentation: qos.presentation,
            partition: HddsPartitionQosPolicy::from_native(&qos.partition)?,
            group_data: HddsGroupDataQosPolicy::from_native(&qos.group_data),
            entity_factory: qos.entity_factory,
        })
    }

    /// # Safety
    /// Nested buffers must be null or valid.
    pub unsafe fn to_native(&self) -> SubscriberQos {
        SubscriberQos {
            presentation: self.presentation,
            partition: self.partition.to_native(),
            group_data: self.group_data.to_native(),
            entity_factory: self.entity_factory,
        }
    }
}

impl NestedBuffers for HddsSubscriberQos {
    unsafe fn release_nested(&mut self) {
        self.partition.release();
        release_octets(&mut self.group_data.value);
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct HddsDataWriterQos {
    pub durability: DurabilityQosPolicy,
    pub deadline: DeadlineQosPolicy,
    pub latency_budget: LatencyBudgetQosPolicy,
    pub liveliness: LivelinessQosPolicy,
    pub reliability: ReliabilityQosPolicy,
    pub destination_order: DestinationOrderQosPolicy,
    pub history: HistoryQosPolicy,
    pub resource_limits: ResourceLimitsQosPolicy,
    pub transport_priority: TransportPriorityQosPolicy,
    pub lifespan: LifespanQosPolicy,
    pub user_data: HddsUserDataQosPolicy,
    pub ownership: OwnershipQosPolicy,
    pub ownership_strength: OwnershipStrengthQosPolicy,
    pub writer_data_lifecycle: WriterDataLifecycleQosPolicy,
}

impl HddsDataWriterQos {
    pub fn from_native(qos: &DataWriterQos) -> Self {
        Self {
            durability: qos.durability,
            deadline: qos.deadline,
            latency_budget: qos.latency_budget,
            liveliness: qos.liveliness,
            reliability: qos.reliability,
            destination_order: qos.destination_order,
            history: qos.history,
            resource_limits: qos.resource_limits,
            transport_priority: qos.transport_priority,
            lifespan: qos.lifespan,
            user_data: HddsUserDataQosPolicy::from_native(&qos.user_data),
            ownership: qos.ownership,
            ownership_strength: qos.ownership_strength,
            writer_data_lifecycle: qos.writer_data_lifecycle,
        }
    }

    /// # Safety
    /// Nested buffers must be null or valid.
    pub unsafe fn to_native(&self) -> DataWriterQos {
        DataWriterQos {
            durability: self.durability,
            deadline: self.deadline,
            latency_budget: self.latency_budget,
            liveliness: self.liveliness,
            reliability: self.reliability,
            destination_order: self.destination_order,
            history: self.history,
            resource_limits: self.resource_limits,
            transport_priority: self.transport_priority,
            lifespan: self.lifespan,
            user_data: self.user_data.to_native(),
            ownership: self.ownership,
            ownership_strength: self.ownership_strength,
            writer_data_lifecycle: self.writer_data_lifecycle,
        }
    }
}

impl NestedBuffers for HddsDataWriterQos {
    unsafe fn release_nested(&mut self) {
        release_octets(&mut self.user_data.value);
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct HddsDataReaderQos {
    pub durability: DurabilityQosPolicy,
    pub deadline: DeadlineQosPolicy,
    pub latency_budget: LatencyBudgetQosPolicy,
    pub liveliness: LivelinessQosPolicy,
    pub reliability: ReliabilityQosPolicy,
    pub destination_order: DestinationOrderQosPolicy,
    pub history: HistoryQosPolicy,
    pub resource_limits: ResourceLimitsQosPolicy,
    pub user_data: HddsUserDataQosPolicy,
    pub ownership: OwnershipQosPolicy,
    pub time_based_filter: TimeBasedFilterQosPolicy,
    pub reader_data_lifecycle: ReaderDataLifecycleQosPolicy,
}

impl HddsDataReaderQos {
    pub fn from_native(qos: &DataReaderQos) -> Self {
        Self {
            durability: qos.durability,
            deadline: qos.deadline,
            latency_budget: qos.latency_budget,
            liveliness: qos.liveliness,
            reliability: qos.reliability,
            destination_order: qos.destination_order,
            history: qos.history,
            resource_limits: qos.resource_limits,
            user_data: HddsUserDataQosPolicy::from_native(&qos.user_data),
            ownership: qos.ownership,
            time_based_filter: qos.time_based_filter,
            reader_data_lifecycle: qos.reader_data_lifecycle,
        }
    }

    /// # Safety
    /// Nested buffers must be null or valid.
    pub unsafe fn to_native(&self) -> DataReaderQos {
        DataReaderQos {
            durability: self.durability,
            deadline: self.deadline,
            latency_budget: self.latency_budget,
            liveliness: self.liveliness,
            reliability: self.reliability,
            destination_order: self.destination_order,
            history: self.history,
            resource_limits: self.resource_limits,
            user_data: self.user_data.to_native(),
            ownership: self.ownership,
            time_based_filter: self.time_based_filter,
            reader_data_lifecycle: self.reader_data_lifecycle,
        }
    }
}

impl NestedBuffers for HddsDataReaderQos {
    unsafe fn release_nested(&mut self) {
        release_octets(&mut self.user_data.value);
    }
}

// =============================================================================
// Release helpers
// =============================================================================

/// Release the nested buffers (user data) of a participant QoS wrapper.
///
/// The wrapper itself stays owned by the caller; its buffer fields are nulled,
/// so a second call is a no-op.
///
/// # Safety
/// - `qos` must be NULL or a wrapper filled by the matching `get_qos`.
#[no_mangle]
pub unsafe extern "C" fn hdds_domain_participant_qos_release(qos: *mut HddsDomainParticipantQos) {
    if let Some(qos) = qos.as_mut() {
        qos.release_nested();
    }
}

/// Release the nested buffers (topic data) of a topic QoS wrapper.
///
/// # Safety
/// - `qos` must be NULL or a wrapper filled by the matching `get_qos`.
#[no_mangle]
pub unsafe extern "C" fn hdds_topic_qos_release(qos: *mut HddsTopicQos) {
    if let Some(qos) = qos.as_mut() {
        qos.release_nested();
    }
}

/// Release the nested buffers (partition names, group data) of a publisher QoS wrapper.
///
/// # Safety
/// - `qos` must be NULL or a wrapper filled by the matching `get_qos`.
#[no_mangle]
pub unsafe extern "C" fn hdds_publisher_qos_release(qos: *mut HddsPublisherQos) {
    if let Some(qos) = qos.as_mut() {
        qos.release_nested();
    }
}

/// Release the nested buffers (partition names, group data) of a subscriber QoS wrapper.
///
/// # Safety
/// - `qos` must be NULL or a wrapper filled by the matching `get_qos`.
#[no_mangle]
pub unsafe extern "C" fn hdds_subscriber_qos_release(qos: *mut HddsSubscriberQos) {
    if let Some(qos) = qos.as_mut() {
        qos.release_nested();
    }
}

/// Release the nested buffers (user data) of a data writer QoS wrapper.
///
/// # Safety
/// - `qos` must be NULL or a wrapper filled by the matching `get_qos`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_writer_qos_release(qos: *mut HddsDataWriterQos) {
    if let Some(qos) = qos.as_mut() {
        qos.release_nested();
    }
}

/// Release the nested buffers (user data) of a data reader QoS wrapper.
///
/// # Safety
/// - `qos` must be NULL or a wrapper filled by the matching `get_qos`.
#[no_mangle]
pub unsafe extern "C" fn hdds_data_reader_qos_release(qos: *mut HddsDataReaderQos) {
    if let Some(qos) = qos.as_mut() {
        qos.release_nested();
    }
}
