// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QoS policies as the provider exposes them (DDS v1.4 Sec.2.2.3).
//!
//! Fixed-size policies are `#[repr(C)]` so the boundary wrappers can embed
//! them verbatim. USER_DATA, TOPIC_DATA, GROUP_DATA and PARTITION hold
//! variable-length data and are re-encoded by `crate::qos`.

/// DDS `Duration_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub sec: i32,
    pub nanosec: u32,
}

impl Duration {
    pub const ZERO: Duration = Duration { sec: 0, nanosec: 0 };
    pub const INFINITE: Duration = Duration {
        sec: 0x7fff_ffff,
        nanosec: 0x7fff_ffff,
    };

    pub const fn new(sec: i32, nanosec: u32) -> Self {
        Self { sec, nanosec }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::ZERO
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurabilityQosPolicyKind {
    #[default]
    Volatile = 0,
    TransientLocal = 1,
    Transient = 2,
    Persistent = 3,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurabilityQosPolicy {
    pub kind: DurabilityQosPolicyKind,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineQosPolicy {
    pub period: Duration,
}

impl Default for DeadlineQosPolicy {
    fn default() -> Self {
        Self {
            period: Duration::INFINITE,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyBudgetQosPolicy {
    pub duration: Duration,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LivelinessQosPolicyKind {
    #[default]
    Automatic = 0,
    ManualByParticipant = 1,
    ManualByTopic = 2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivelinessQosPolicy {
    pub kind: LivelinessQosPolicyKind,
    pub lease_duration: Duration,
}

impl Default for LivelinessQosPolicy {
    fn default() -> Self {
        Self {
            kind: LivelinessQosPolicyKind::Automatic,
            lease_duration: Duration::INFINITE,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReliabilityQosPolicyKind {
    #[default]
    BestEffort = 0,
    Reliable = 1,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReliabilityQosPolicy {
    pub kind: ReliabilityQosPolicyKind,
    pub max_blocking_time: Duration,
}

impl Default for ReliabilityQosPolicy {
    fn default() -> Self {
        Self {
            kind: ReliabilityQosPolicyKind::BestEffort,
            max_blocking_time: Duration::new(0, 100_000_000),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DestinationOrderQosPolicyKind {
    #[default]
    ByReceptionTimestamp = 0,
    BySourceTimestamp = 1,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestinationOrderQosPolicy {
    pub kind: DestinationOrderQosPolicyKind,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryQosPolicyKind {
    #[default]
    KeepLast = 0,
    KeepAll = 1,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQosPolicy {
    pub kind: HistoryQosPolicyKind,
    pub depth: i32,
}

impl Default for HistoryQosPolicy {
    fn default() -> Self {
        Self {
            kind: HistoryQosPolicyKind::KeepLast,
            depth: 1,
        }
    }
}

/// `LENGTH_UNLIMITED` for resource limits.
pub const LENGTH_UNLIMITED: i32 = -1;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimitsQosPolicy {
    pub max_samples: i32,
    pub max_instances: i32,
    pub max_samples_per_instance: i32,
}

impl Default for ResourceLimitsQosPolicy {
    fn default() -> Self {
        Self {
            max_samples: LENGTH_UNLIMITED,
            max_instances: LENGTH_UNLIMITED,
            max_samples_per_instance: LENGTH_UNLIMITED,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportPriorityQosPolicy {
    pub value: i32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifespanQosPolicy {
    pub duration: Duration,
}

impl Default for LifespanQosPolicy {
    fn default() -> Self {
        Self {
            duration: Duration::INFINITE,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipQosPolicyKind {
    #[default]
    Shared = 0,
    Exclusive = 1,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipQosPolicy {
    pub kind: OwnershipQosPolicyKind,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipStrengthQosPolicy {
    pub value: i32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresentationQosPolicyAccessScopeKind {
    #[default]
    Instance = 0,
    Topic = 1,
    Group = 2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentationQosPolicy {
    pub access_scope: PresentationQosPolicyAccessScopeKind,
    pub coherent_access: bool,
    pub ordered_access: bool,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityFactoryQosPolicy {
    pub autoenable_created_entities: bool,
}

impl Default for EntityFactoryQosPolicy {
    fn default() -> Self {
        Self {
            autoenable_created_entities: true,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBasedFilterQosPolicy {
    pub minimum_separation: Duration,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterDataLifecycleQosPolicy {
    pub autodispose_unregistered_instances: bool,
}

impl Default for WriterDataLifecycleQosPolicy {
    fn default() -> Self {
        Self {
            autodispose_unregistered_instances: true,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderDataLifecycleQosPolicy {
    pub autopurge_nowriter_samples_delay: Duration,
    pub autopurge_disposed_samples_delay: Duration,
}

impl Default for ReaderDataLifecycleQosPolicy {
    fn default() -> Self {
        Self {
            autopurge_nowriter_samples_delay: Duration::INFINITE,
            autopurge_disposed_samples_delay: Duration::INFINITE,
        }
    }
}

/// USER_DATA: opaque bytes attached to a participant, writer or reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDataQosPolicy {
    pub value: Vec<u8>,
}

/// TOPIC_DATA: opaque bytes attached to a topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicDataQosPolicy {
    pub value: Vec<u8>,
}

/// GROUP_DATA: opaque bytes attached to a publisher or subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDataQosPolicy {
    pub value: Vec<u8>,
}

/// PARTITION: logical partition names. Empty means the default partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionQosPolicy {
    pub name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParticipantQos {
    pub user_data: UserDataQosPolicy,
    pub entity_factory: EntityFactoryQosPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicQos {
    pub topic_data: TopicDataQosPolicy,
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublisherQos {
    pub presentation: PresentationQosPolicy,
    pub partition: PartitionQosPolicy,
    pub group_data: GroupDataQosPolicy,
    pub entity_factory: EntityFactoryQosPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberQos {
    pub presentation: PresentationQosPolicy,
    pub partition: PartitionQosPolicy,
    pub group_data: GroupDataQosPolicy,
    pub entity_factory: EntityFactoryQosPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataWriterQos {
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
    pub user_data: UserDataQosPolicy,
    pub ownership: OwnershipQosPolicy,
    pub ownership_strength: OwnershipStrengthQosPolicy,
    pub writer_data_lifecycle: WriterDataLifecycleQosPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataReaderQos {
    pub durability: DurabilityQosPolicy,
    pub deadline: DeadlineQosPolicy,
    pub latency_budget: LatencyBudgetQosPolicy,
    pub liveliness: LivelinessQosPolicy,
    pub reliability: ReliabilityQosPolicy,
    pub destination_order: DestinationOrderQosPolicy,
    pub history: HistoryQosPolicy,
    pub resource_limits: ResourceLimitsQosPolicy,
    pub user_data: UserDataQosPolicy,
    pub ownership: OwnershipQosPolicy,
    pub time_based_filter: TimeBasedFilterQosPolicy,
    pub reader_data_lifecycle: ReaderDataLifecycleQosPolicy,
}
