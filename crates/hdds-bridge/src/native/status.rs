// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Communication status values delivered by the provider.
//!
//! Fixed-size statuses are `#[repr(C)]` and cross the boundary as-is.
//! The two incompatible-QoS statuses carry a variable-length policy list and
//! go through a wrapper (see `crate::status`).

use super::InstanceHandle;

/// Identifier of a QoS policy (DDS v1.4 Sec.2.2.3, `QosPolicyId_t`).
pub type QosPolicyId = i32;

pub const INVALID_QOS_POLICY_ID: QosPolicyId = 0;
pub const USERDATA_QOS_POLICY_ID: QosPolicyId = 1;
pub const DURABILITY_QOS_POLICY_ID: QosPolicyId = 2;
pub const PRESENTATION_QOS_POLICY_ID: QosPolicyId = 3;
pub const DEADLINE_QOS_POLICY_ID: QosPolicyId = 4;
pub const LATENCYBUDGET_QOS_POLICY_ID: QosPolicyId = 5;
pub const OWNERSHIP_QOS_POLICY_ID: QosPolicyId = 6;
pub const OWNERSHIPSTRENGTH_QOS_POLICY_ID: QosPolicyId = 7;
pub const LIVELINESS_QOS_POLICY_ID: QosPolicyId = 8;
pub const TIMEBASEDFILTER_QOS_POLICY_ID: QosPolicyId = 9;
pub const PARTITION_QOS_POLICY_ID: QosPolicyId = 10;
pub const RELIABILITY_QOS_POLICY_ID: QosPolicyId = 11;
pub const DESTINATIONORDER_QOS_POLICY_ID: QosPolicyId = 12;
pub const HISTORY_QOS_POLICY_ID: QosPolicyId = 13;
pub const RESOURCELIMITS_QOS_POLICY_ID: QosPolicyId = 14;

/// Inconsistent topic status (topic with the same name, different type).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InconsistentTopicStatus {
    /// Total cumulative count of inconsistent topics discovered.
    pub total_count: i32,
    /// Change in total_count since last read.
    pub total_count_change: i32,
}

/// Sample lost status (gap in the received sequence numbers).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleLostStatus {
    pub total_count: i32,
    pub total_count_change: i32,
}

/// Why the last sample was rejected.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SampleRejectedStatusKind {
    #[default]
    NotRejected = 0,
    RejectedByInstancesLimit = 1,
    RejectedBySamplesLimit = 2,
    RejectedBySamplesPerInstanceLimit = 3,
}

/// Sample rejected status (resource limits hit on the reader).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleRejectedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_reason: SampleRejectedStatusKind,
    /// Instance of the last rejected sample.
    pub last_instance_handle: InstanceHandle,
}

/// Liveliness lost status (writer failed to assert liveliness in time).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivelinessLostStatus {
    pub total_count: i32,
    pub total_count_change: i32,
}

/// Liveliness changed status (matched writers became alive/not alive).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivelinessChangedStatus {
    /// Number of matched writers currently asserting liveliness.
    pub alive_count: i32,
    /// Number of matched writers that lost liveliness.
    pub not_alive_count: i32,
    pub alive_count_change: i32,
    pub not_alive_count_change: i32,
    /// Writer whose change caused the status update.
    pub last_publication_handle: InstanceHandle,
}

/// Offered deadline missed status (writer side).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferedDeadlineMissedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_instance_handle: InstanceHandle,
}

/// Requested deadline missed status (reader side).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestedDeadlineMissedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_instance_handle: InstanceHandle,
}

/// Publication matched status (writer side).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicationMatchedStatus {
    /// Total cumulative count of matched subscriptions.
    pub total_count: i32,
    pub total_count_change: i32,
    /// Current number of matched subscriptions.
    pub current_count: i32,
    pub current_count_change: i32,
    pub last_subscription_handle: InstanceHandle,
}

/// Subscription matched status (reader side).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionMatchedStatus {
    /// Total cumulative count of matched publications.
    pub total_count: i32,
    pub total_count_change: i32,
    /// Current number of matched publications.
    pub current_count: i32,
    pub current_count_change: i32,
    pub last_publication_handle: InstanceHandle,
}

/// Per-policy incompatibility counter.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QosPolicyCount {
    pub policy_id: QosPolicyId,
    pub count: i32,
}

/// Offered incompatible QoS status (writer side).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferedIncompatibleQosStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    /// Policy found incompatible by the last mismatch.
    pub last_policy_id: QosPolicyId,
    /// Cumulative mismatch count for every policy involved so far.
    pub policies: Vec<QosPolicyCount>,
}

/// Requested incompatible QoS status (reader side).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedIncompatibleQosStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_policy_id: QosPolicyId,
    pub policies: Vec<QosPolicyCount>,
}
