// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Boundary-safe status structures.
//!
//! Fixed-size statuses are already `#[repr(C)]` in `native::status` and are
//! re-exported here under their C names. The incompatible-QoS statuses carry a
//! variable policy list, encoded as a flat buffer of [`QosPolicyCount`].

use std::ptr;

use crate::codec::{self, FlatSequence, NestedBuffers};
use crate::native::status::{
    OfferedIncompatibleQosStatus, QosPolicyCount, QosPolicyId, RequestedIncompatibleQosStatus,
};

pub use crate::native::status::{
    InconsistentTopicStatus as HddsInconsistentTopicStatus,
    LivelinessChangedStatus as HddsLivelinessChangedStatus,
    LivelinessLostStatus as HddsLivelinessLostStatus,
    OfferedDeadlineMissedStatus as HddsOfferedDeadlineMissedStatus,
    PublicationMatchedStatus as HddsPublicationMatchedStatus,
    QosPolicyCount as HddsQosPolicyCount,
    RequestedDeadlineMissedStatus as HddsRequestedDeadlineMissedStatus,
    SampleLostStatus as HddsSampleLostStatus, SampleRejectedStatus as HddsSampleRejectedStatus,
    SubscriptionMatchedStatus as HddsSubscriptionMatchedStatus,
};

/// C mirror of the offered incompatible QoS status.
///
/// `policies` is a flat buffer of `HddsQosPolicyCount`. When returned from a
/// query it belongs to the caller (`hdds_release_native_ptr`); when passed to
/// a callback it is only valid for the duration of the call.
#[repr(C)]
#[derive(Debug)]
pub struct HddsOfferedIncompatibleQosStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_policy_id: QosPolicyId,
    pub policies: *mut u8,
}

/// C mirror of the requested incompatible QoS status.
///
/// Same ownership rules as [`HddsOfferedIncompatibleQosStatus`].
#[repr(C)]
#[derive(Debug)]
pub struct HddsRequestedIncompatibleQosStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_policy_id: QosPolicyId,
    pub policies: *mut u8,
}

impl HddsOfferedIncompatibleQosStatus {
    pub fn from_native(status: &OfferedIncompatibleQosStatus) -> Self {
        Self {
            total_count: status.total_count,
            total_count_change: status.total_count_change,
            last_policy_id: status.last_policy_id,
            policies: FlatSequence::encode(&status.policies).into_raw(),
        }
    }

    /// # Safety
    /// `policies` must be null or a valid flat buffer of `HddsQosPolicyCount`.
    pub unsafe fn to_native(&self) -> OfferedIncompatibleQosStatus {
        OfferedIncompatibleQosStatus {
            total_count: self.total_count,
            total_count_change: self.total_count_change,
            last_policy_id: self.last_policy_id,
            policies: codec::decode::<QosPolicyCount>(self.policies),
        }
    }
}

impl HddsRequestedIncompatibleQosStatus {
    pub fn from_native(status: &RequestedIncompatibleQosStatus) -> Self {
        Self {
            total_count: status.total_count,
            total_count_change: status.total_count_change,
            last_policy_id: status.last_policy_id,
            policies: FlatSequence::encode(&status.policies).into_raw(),
        }
    }

    /// # Safety
    /// `policies` must be null or a valid flat buffer of `HddsQosPolicyCount`.
    pub unsafe fn to_native(&self) -> RequestedIncompatibleQosStatus {
        RequestedIncompatibleQosStatus {
            total_count: self.total_count,
            total_count_change: self.total_count_change,
            last_policy_id: self.last_policy_id,
            policies: codec::decode::<QosPolicyCount>(self.policies),
        }
    }
}

impl NestedBuffers for HddsOfferedIncompatibleQosStatus {
    unsafe fn release_nested(&mut self) {
        codec::c_free(self.policies);
        self.policies = ptr::null_mut();
    }
}

impl NestedBuffers for HddsRequestedIncompatibleQosStatus {
    unsafe fn release_nested(&mut self) {
        codec::c_free(self.policies);
        self.policies = ptr::null_mut();
    }
}
