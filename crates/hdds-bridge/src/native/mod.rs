// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DDS provider interface.
//!
//! The protocol engine (discovery, RTPS, transports) lives behind these
//! traits. The bridge never looks inside it: it receives listener calls on
//! threads the provider chooses, and forwards query results and return codes
//! to the caller runtime unchanged.
//!
//! # DDS Standard
//!
//! Status kinds and return codes follow DDS v1.4 Sec.2.2.4.1 and Sec.2.2.1.1.

pub mod entity;
pub mod listener;
pub mod qos;
pub mod status;

pub use entity::{
    DataReader, DataWriter, DomainParticipant, Entity, Publisher, Subscriber, Topic,
};
pub use listener::{
    DataReaderListener, DataWriterListener, DomainParticipantListener, PublisherListener,
    SubscriberListener, TopicListener,
};

/// Identity of an entity or instance, as assigned by the provider.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct InstanceHandle(pub u64);

impl InstanceHandle {
    /// The "no instance" handle.
    pub const NIL: InstanceHandle = InstanceHandle(0);

    pub fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for InstanceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// DDS return codes.
///
/// Provider results travel through the bridge untouched. The bridge only
/// produces `BadParameter` (null or unknown argument) and `Error` (its own
/// executor or allocator is unavailable).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Ok = 0,
    Error = 1,
    Unsupported = 2,
    BadParameter = 3,
    PreconditionNotMet = 4,
    OutOfResources = 5,
    NotEnabled = 6,
    ImmutablePolicy = 7,
    InconsistentPolicy = 8,
    AlreadyDeleted = 9,
    Timeout = 10,
    NoData = 11,
    IllegalOperation = 12,
}

impl ReturnCode {
    pub fn is_ok(self) -> bool {
        self == ReturnCode::Ok
    }
}

/// One communication status kind (a single bit of a [`StatusMask`]).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    InconsistentTopic = 1 << 0,
    OfferedDeadlineMissed = 1 << 1,
    RequestedDeadlineMissed = 1 << 2,
    OfferedIncompatibleQos = 1 << 5,
    RequestedIncompatibleQos = 1 << 6,
    SampleLost = 1 << 7,
    SampleRejected = 1 << 8,
    DataOnReaders = 1 << 9,
    DataAvailable = 1 << 10,
    LivelinessLost = 1 << 11,
    LivelinessChanged = 1 << 12,
    PublicationMatched = 1 << 13,
    SubscriptionMatched = 1 << 14,
}

impl StatusKind {
    pub const ALL: [StatusKind; 13] = [
        StatusKind::InconsistentTopic,
        StatusKind::OfferedDeadlineMissed,
        StatusKind::RequestedDeadlineMissed,
        StatusKind::OfferedIncompatibleQos,
        StatusKind::RequestedIncompatibleQos,
        StatusKind::SampleLost,
        StatusKind::SampleRejected,
        StatusKind::DataOnReaders,
        StatusKind::DataAvailable,
        StatusKind::LivelinessLost,
        StatusKind::LivelinessChanged,
        StatusKind::PublicationMatched,
        StatusKind::SubscriptionMatched,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StatusKind::InconsistentTopic => "INCONSISTENT_TOPIC",
            StatusKind::OfferedDeadlineMissed => "OFFERED_DEADLINE_MISSED",
            StatusKind::RequestedDeadlineMissed => "REQUESTED_DEADLINE_MISSED",
            StatusKind::OfferedIncompatibleQos => "OFFERED_INCOMPATIBLE_QOS",
            StatusKind::RequestedIncompatibleQos => "REQUESTED_INCOMPATIBLE_QOS",
            StatusKind::SampleLost => "SAMPLE_LOST",
            StatusKind::SampleRejected => "SAMPLE_REJECTED",
            StatusKind::DataOnReaders => "DATA_ON_READERS",
            StatusKind::DataAvailable => "DATA_AVAILABLE",
            StatusKind::LivelinessLost => "LIVELINESS_LOST",
            StatusKind::LivelinessChanged => "LIVELINESS_CHANGED",
            StatusKind::PublicationMatched => "PUBLICATION_MATCHED",
            StatusKind::SubscriptionMatched => "SUBSCRIPTION_MATCHED",
        }
    }
}

/// Bit set of [`StatusKind`] values, as passed to `set_listener`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusMask(pub u32);

impl StatusMask {
    pub const NONE: StatusMask = StatusMask(0);
    pub const ALL: StatusMask = StatusMask(u32::MAX);

    pub fn contains(self, kind: StatusKind) -> bool {
        self.0 & kind as u32 != 0
    }

    #[must_use]
    pub fn with(self, kind: StatusKind) -> StatusMask {
        StatusMask(self.0 | kind as u32)
    }
}

impl From<StatusKind> for StatusMask {
    fn from(kind: StatusKind) -> Self {
        StatusMask(kind as u32)
    }
}
