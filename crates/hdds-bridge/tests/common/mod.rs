// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory provider and callback recorder shared by the integration tests.

#![allow(dead_code)]

use std::os::raw::c_void;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use hdds_bridge::native::qos::{
    DataReaderQos, DataWriterQos, DomainParticipantQos, PublisherQos, SubscriberQos, TopicQos,
};
use hdds_bridge::native::status::{
    InconsistentTopicStatus, OfferedIncompatibleQosStatus, PublicationMatchedStatus,
    RequestedIncompatibleQosStatus, SampleLostStatus, SubscriptionMatchedStatus,
};
use hdds_bridge::native::{
    DataReader, DataReaderListener, DataWriter, DataWriterListener, DomainParticipant,
    DomainParticipantListener, Entity, Publisher, PublisherListener, Subscriber,
    SubscriberListener, Topic, TopicListener,
};
use hdds_bridge::runtime::hdds_runtime_destroy;
use hdds_bridge::status::{
    HddsInconsistentTopicStatus, HddsLivelinessChangedStatus, HddsOfferedIncompatibleQosStatus,
    HddsPublicationMatchedStatus, HddsQosPolicyCount, HddsRequestedIncompatibleQosStatus,
    HddsSampleLostStatus, HddsSubscriptionMatchedStatus,
};
use hdds_bridge::{
    codec, BridgeConfig, BridgeRuntime, EntityRef, HddsRuntime, InstanceHandle, ReturnCode,
    StatusKind, StatusMask,
};
use parking_lot::Mutex;

pub const PARTICIPANT: InstanceHandle = InstanceHandle(0x10);
pub const TOPIC: InstanceHandle = InstanceHandle(0x20);
pub const PUBLISHER: InstanceHandle = InstanceHandle(0x30);
pub const SUBSCRIBER: InstanceHandle = InstanceHandle(0x40);
pub const WRITER: InstanceHandle = InstanceHandle(0x50);
pub const READER: InstanceHandle = InstanceHandle(0x60);

pub const WORKER_PREFIX: &str = "bridge-test-cb";

// =============================================================================
// Runtime harness
// =============================================================================

/// A runtime handle with the mock entities registered.
pub struct Harness {
    pub runtime: *mut HddsRuntime,
    pub participant: Arc<MockParticipant>,
    pub topic: Arc<MockTopic>,
    pub publisher: Arc<MockPublisher>,
    pub subscriber: Arc<MockSubscriber>,
    pub writer: Arc<MockWriter>,
    pub reader: Arc<MockReader>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_workers(2)
    }

    pub fn with_workers(dispatch_workers: usize) -> Self {
        let config = BridgeConfig {
            dispatch_workers,
            queue_capacity: 32,
            thread_name: WORKER_PREFIX.to_string(),
        };
        let runtime = BridgeRuntime::new(config).expect("runtime");

        let participant = Arc::new(MockParticipant::new(PARTICIPANT));
        let topic = Arc::new(MockTopic::new(TOPIC, "SensorData", "sensors::Reading"));
        let publisher = Arc::new(MockPublisher::new(PUBLISHER));
        let subscriber = Arc::new(MockSubscriber::new(SUBSCRIBER));
        let writer = Arc::new(MockWriter::new(WRITER));
        let reader = Arc::new(MockReader::new(READER));

        let registry = runtime.registry();
        registry.register(EntityRef::Participant(participant.clone()));
        registry.register(EntityRef::Topic(topic.clone()));
        registry.register(EntityRef::Publisher(publisher.clone()));
        registry.register(EntityRef::Subscriber(subscriber.clone()));
        registry.register(EntityRef::DataWriter(writer.clone()));
        registry.register(EntityRef::DataReader(reader.clone()));

        Self {
            runtime: runtime.into_handle(),
            participant,
            topic,
            publisher,
            subscriber,
            writer,
            reader,
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        unsafe { hdds_runtime_destroy(self.runtime) };
    }
}

// =============================================================================
// Mock provider
// =============================================================================

/// Listener attached to a mock entity, with its status mask.
pub struct Attached<L: ?Sized> {
    inner: Mutex<Option<(Arc<L>, StatusMask)>>,
}

impl<L: ?Sized> Default for Attached<L> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }
}

impl<L: ?Sized> Attached<L> {
    fn set(&self, listener: Option<Arc<L>>, mask: StatusMask) -> ReturnCode {
        *self.inner.lock() = listener.map(|l| (l, mask));
        ReturnCode::Ok
    }

    /// The listener enabled for `kind`, if any.
    pub fn enabled_for(&self, kind: StatusKind) -> Option<Arc<L>> {
        self.inner
            .lock()
            .as_ref()
            .filter(|(_, mask)| mask.contains(kind))
            .map(|(l, _)| Arc::clone(l))
    }

    pub fn is_attached(&self) -> bool {
        self.inner.lock().is_some()
    }
}

/// Fails every query with `code` when set.
#[derive(Default)]
pub struct Failure(Mutex<Option<ReturnCode>>);

impl Failure {
    pub fn set(&self, code: ReturnCode) {
        *self.0.lock() = Some(code);
    }

    fn check(&self) -> Result<(), ReturnCode> {
        match *self.0.lock() {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }
}

pub struct MockParticipant {
    handle: InstanceHandle,
    pub qos: Mutex<DomainParticipantQos>,
    pub listener: Attached<dyn DomainParticipantListener>,
    pub discovered: Vec<InstanceHandle>,
    pub topic_names: Vec<String>,
    pub failure: Failure,
}

impl MockParticipant {
    pub fn new(handle: InstanceHandle) -> Self {
        Self {
            handle,
            qos: Mutex::new(DomainParticipantQos::default()),
            listener: Attached::default(),
            discovered: vec![InstanceHandle(0x1001), InstanceHandle(0x1002)],
            topic_names: vec![
                "SensorData".to_string(),
                "Température".to_string(),
                "rt/chatter".to_string(),
            ],
            failure: Failure::default(),
        }
    }
}

impl Entity for MockParticipant {
    fn instance_handle(&self) -> InstanceHandle {
        self.handle
    }
}

impl DomainParticipant for MockParticipant {
    fn get_qos(&self) -> Result<DomainParticipantQos, ReturnCode> {
        self.failure.check()?;
        Ok(self.qos.lock().clone())
    }

    fn set_qos(&self, qos: DomainParticipantQos) -> ReturnCode {
        *self.qos.lock() = qos;
        ReturnCode::Ok
    }

    fn set_listener(
        &self,
        listener: Option<Arc<dyn DomainParticipantListener>>,
        mask: StatusMask,
    ) -> ReturnCode {
        self.listener.set(listener, mask)
    }

    fn get_discovered_participants(&self) -> Result<Vec<InstanceHandle>, ReturnCode> {
        self.failure.check()?;
        Ok(self.discovered.clone())
    }

    fn get_discovered_topic_names(&self) -> Result<Vec<String>, ReturnCode> {
        self.failure.check()?;
        Ok(self.topic_names.clone())
    }
}

pub struct MockTopic {
    handle: InstanceHandle,
    name: String,
    type_name: String,
    pub qos: Mutex<TopicQos>,
    pub listener: Attached<dyn TopicListener>,
    pub failure: Failure,
}

impl MockTopic {
    pub fn new(handle: InstanceHandle, name: &str, type_name: &str) -> Self {
        Self {
            handle,
            name: name.to_string(),
            type_name: type_name.to_string(),
            qos: Mutex::new(TopicQos::default()),
            listener: Attached::default(),
            failure: Failure::default(),
        }
    }

    pub fn notify_inconsistent(&self, status: InconsistentTopicStatus) -> bool {
        match self.listener.enabled_for(StatusKind::InconsistentTopic) {
            Some(l) => {
                l.on_inconsistent_topic(self.handle, status);
                true
            }
            None => false,
        }
    }
}

impl Entity for MockTopic {
    fn instance_handle(&self) -> InstanceHandle {
        self.handle
    }
}

impl Topic for MockTopic {
    fn get_qos(&self) -> Result<TopicQos, ReturnCode> {
        self.failure.check()?;
        Ok(self.qos.lock().clone())
    }

    fn set_qos(&self, qos: TopicQos) -> ReturnCode {
        *self.qos.lock() = qos;
        ReturnCode::Ok
    }

    fn set_listener(
        &self,
        listener: Option<Arc<dyn TopicListener>>,
        mask: StatusMask,
    ) -> ReturnCode {
        self.listener.set(listener, mask)
    }

    fn get_name(&self) -> String {
        self.name.clone()
    }

    fn get_type_name(&self) -> String {
        self.type_name.clone()
    }

    fn get_inconsistent_topic_status(&self) -> Result<InconsistentTopicStatus, ReturnCode> {
        self.failure.check()?;
        Ok(InconsistentTopicStatus {
            total_count: 3,
            total_count_change: 1,
        })
    }
}

pub struct MockPublisher {
    handle: InstanceHandle,
    pub qos: Mutex<PublisherQos>,
    pub listener: Attached<dyn PublisherListener>,
}

impl MockPublisher {
    pub fn new(handle: InstanceHandle) -> Self {
        Self {
            handle,
            qos: Mutex::new(PublisherQos::default()),
            listener: Attached::default(),
        }
    }

    /// Forward a writer event the writer itself has no listener for.
    pub fn notify(
        &self,
        kind: StatusKind,
        f: impl FnOnce(&dyn PublisherListener),
    ) -> bool {
        match self.listener.enabled_for(kind) {
            Some(l) => {
                f(&*l);
                true
            }
            None => false,
        }
    }
}

impl Entity for MockPublisher {
    fn instance_handle(&self) -> InstanceHandle {
        self.handle
    }
}

impl Publisher for MockPublisher {
    fn get_qos(&self) -> Result<PublisherQos, ReturnCode> {
        Ok(self.qos.lock().clone())
    }

    fn set_qos(&self, qos: PublisherQos) -> ReturnCode {
        *self.qos.lock() = qos;
        ReturnCode::Ok
    }

    fn set_listener(
        &self,
        listener: Option<Arc<dyn PublisherListener>>,
        mask: StatusMask,
    ) -> ReturnCode {
        self.listener.set(listener, mask)
    }
}

pub struct MockSubscriber {
    handle: InstanceHandle,
    pub qos: Mutex<SubscriberQos>,
    pub listener: Attached<dyn SubscriberListener>,
}

impl MockSubscriber {
    pub fn new(handle: InstanceHandle) -> Self {
        Self {
            handle,
            qos: Mutex::new(SubscriberQos::default()),
            listener: Attached::default(),
        }
    }

    pub fn notify(&self, kind: StatusKind, f: impl FnOnce(&dyn SubscriberListener)) -> bool {
        match self.listener.enabled_for(kind) {
            Some(l) => {
                f(&*l);
                true
            }
            None => false,
        }
    }
}

impl Entity for MockSubscriber {
    fn instance_handle(&self) -> InstanceHandle {
        self.handle
    }
}

impl Subscriber for MockSubscriber {
    fn get_qos(&self) -> Result<SubscriberQos, ReturnCode> {
        Ok(self.qos.lock().clone())
    }

    fn set_qos(&self, qos: SubscriberQos) -> ReturnCode {
        *self.qos.lock() = qos;
        ReturnCode::Ok
    }

    fn set_listener(
        &self,
        listener: Option<Arc<dyn SubscriberListener>>,
        mask: StatusMask,
    ) -> ReturnCode {
        self.listener.set(listener, mask)
    }
}

pub struct MockWriter {
    handle: InstanceHandle,
    pub qos: Mutex<DataWriterQos>,
    pub listener: Attached<dyn DataWriterListener>,
    pub matched: Vec<InstanceHandle>,
    pub incompatible: OfferedIncompatibleQosStatus,
    pub failure: Failure,
}

impl MockWriter {
    pub fn new(handle: InstanceHandle) -> Self {
        Self {
            handle,
            qos: Mutex::new(DataWriterQos::default()),
            listener: Attached::default(),
            matched: vec![READER, InstanceHandle(0x61), InstanceHandle(0x62)],
            incompatible: OfferedIncompatibleQosStatus::default(),
            failure: Failure::default(),
        }
    }

    pub fn notify(&self, kind: StatusKind, f: impl FnOnce(&dyn DataWriterListener)) -> bool {
        match self.listener.enabled_for(kind) {
            Some(l) => {
                f(&*l);
                true
            }
            None => false,
        }
    }
}

impl Entity for MockWriter {
    fn instance_handle(&self) -> InstanceHandle {
        self.handle
    }
}

impl DataWriter for MockWriter {
    fn get_qos(&self) -> Result<DataWriterQos, ReturnCode> {
        self.failure.check()?;
        Ok(self.qos.lock().clone())
    }

    fn set_qos(&self, qos: DataWriterQos) -> ReturnCode {
        *self.qos.lock() = qos;
        ReturnCode::Ok
    }

    fn set_listener(
        &self,
        listener: Option<Arc<dyn DataWriterListener>>,
        mask: StatusMask,
    ) -> ReturnCode {
        self.listener.set(listener, mask)
    }

    fn get_matched_subscriptions(&self) -> Result<Vec<InstanceHandle>, ReturnCode> {
        self.failure.check()?;
        Ok(self.matched.clone())
    }

    fn get_offered_incompatible_qos_status(
        &self,
    ) -> Result<OfferedIncompatibleQosStatus, ReturnCode> {
        self.failure.check()?;
        Ok(self.incompatible.clone())
    }

    fn get_publication_matched_status(&self) -> Result<PublicationMatchedStatus, ReturnCode> {
        self.failure.check()?;
        Ok(PublicationMatchedStatus {
            total_count: self.matched.len() as i32,
            total_count_change: 1,
            current_count: self.matched.len() as i32,
            current_count_change: 1,
            last_subscription_handle: READER,
        })
    }
}

pub struct MockReader {
    handle: InstanceHandle,
    pub qos: Mutex<DataReaderQos>,
    pub listener: Attached<dyn DataReaderListener>,
    pub matched: Vec<InstanceHandle>,
    pub incompatible: RequestedIncompatibleQosStatus,
    pub failure: Failure,
}

impl MockReader {
    pub fn new(handle: InstanceHandle) -> Self {
        Self {
            handle,
            qos: Mutex::new(DataReaderQos::default()),
            listener: Attached::default(),
            matched: vec![WRITER],
            incompatible: RequestedIncompatibleQosStatus::default(),
            failure: Failure::default(),
        }
    }

    pub fn notify(&self, kind: StatusKind, f: impl FnOnce(&dyn DataReaderListener)) -> bool {
        match self.listener.enabled_for(kind) {
            Some(l) => {
                f(&*l);
                true
            }
            None => false,
        }
    }

    pub fn data_available(&self) -> bool {
        let handle = self.handle;
        self.notify(StatusKind::DataAvailable, |l| l.on_data_available(handle))
    }
}

impl Entity for MockReader {
    fn instance_handle(&self) -> InstanceHandle {
        self.handle
    }
}

impl DataReader for MockReader {
    fn get_qos(&self) -> Result<DataReaderQos, ReturnCode> {
        self.failure.check()?;
        Ok(self.qos.lock().clone())
    }

    fn set_qos(&self, qos: DataReaderQos) -> ReturnCode {
        *self.qos.lock() = qos;
        ReturnCode::Ok
    }

    fn set_listener(
        &self,
        listener: Option<Arc<dyn DataReaderListener>>,
        mask: StatusMask,
    ) -> ReturnCode {
        self.listener.set(listener, mask)
    }

    fn get_matched_publications(&self) -> Result<Vec<InstanceHandle>, ReturnCode> {
        self.failure.check()?;
        Ok(self.matched.clone())
    }

    fn get_requested_incompatible_qos_status(
        &self,
    ) -> Result<RequestedIncompatibleQosStatus, ReturnCode> {
        self.failure.check()?;
        Ok(self.incompatible.clone())
    }

    fn get_sample_lost_status(&self) -> Result<SampleLostStatus, ReturnCode> {
        self.failure.check()?;
        Ok(SampleLostStatus {
            total_count: 7,
            total_count_change: 2,
        })
    }

    fn get_subscription_matched_status(&self) -> Result<SubscriptionMatchedStatus, ReturnCode> {
        self.failure.check()?;
        Ok(SubscriptionMatchedStatus {
            total_count: 1,
            total_count_change: 1,
            current_count: 1,
            current_count_change: 1,
            last_publication_handle: WRITER,
        })
    }
}

// =============================================================================
// Callback recorder
// =============================================================================

/// One callback invocation as seen by the caller side.
#[derive(Debug, Clone)]
pub struct Call {
    pub kind: StatusKind,
    pub entity: InstanceHandle,
    /// Status-specific value (a count, or the sum of policy counts).
    pub value: i64,
    pub thread: Option<String>,
}

/// Caller-side context passed as `user_data`.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
    pub started: AtomicUsize,
    pub finished: AtomicUsize,
    pub delay: Mutex<Duration>,
    /// Listener handle a callback may dispose from inside itself.
    pub listener: AtomicPtr<c_void>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        let recorder = Self::default();
        *recorder.delay.lock() = delay;
        Arc::new(recorder)
    }

    pub fn user_data(self: &Arc<Self>) -> *mut c_void {
        Arc::as_ptr(self).cast_mut().cast::<c_void>()
    }

    pub fn record(&self, kind: StatusKind, entity: InstanceHandle, value: i64) {
        self.started.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        self.calls.lock().push(Call {
            kind,
            entity,
            value,
            thread: thread::current().name().map(str::to_string),
        });
        self.finished.fetch_add(1, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, kind: StatusKind) -> usize {
        self.calls.lock().iter().filter(|c| c.kind == kind).count()
    }

    /// Spin until `started` reaches `n` or two seconds pass.
    pub fn wait_started(&self, n: usize) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while self.started.load(Ordering::SeqCst) < n {
            if Instant::now() > deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
        true
    }
}

/// # Safety
/// `user_data` must come from [`Recorder::user_data`] on a live recorder.
pub unsafe fn recorder<'a>(user_data: *mut c_void) -> &'a Recorder {
    &*user_data.cast::<Recorder>()
}

unsafe fn policy_total(policies: *const u8) -> i64 {
    codec::decode::<HddsQosPolicyCount>(policies)
        .iter()
        .map(|p| i64::from(p.count))
        .sum()
}

pub unsafe extern "C" fn on_inconsistent_topic(
    topic: InstanceHandle,
    status: *const HddsInconsistentTopicStatus,
    user_data: *mut c_void,
) {
    recorder(user_data).record(
        StatusKind::InconsistentTopic,
        topic,
        i64::from((*status).total_count),
    );
}

pub unsafe extern "C" fn on_offered_incompatible_qos(
    writer: InstanceHandle,
    status: *const HddsOfferedIncompatibleQosStatus,
    user_data: *mut c_void,
) {
    recorder(user_data).record(
        StatusKind::OfferedIncompatibleQos,
        writer,
        policy_total((*status).policies),
    );
}

pub unsafe extern "C" fn on_publication_matched(
    writer: InstanceHandle,
    status: *const HddsPublicationMatchedStatus,
    user_data: *mut c_void,
) {
    recorder(user_data).record(
        StatusKind::PublicationMatched,
        writer,
        i64::from((*status).current_count),
    );
}

pub unsafe extern "C" fn on_requested_incompatible_qos(
    reader: InstanceHandle,
    status: *const HddsRequestedIncompatibleQosStatus,
    user_data: *mut c_void,
) {
    recorder(user_data).record(
        StatusKind::RequestedIncompatibleQos,
        reader,
        policy_total((*status).policies),
    );
}

pub unsafe extern "C" fn on_liveliness_changed(
    reader: InstanceHandle,
    status: *const HddsLivelinessChangedStatus,
    user_data: *mut c_void,
) {
    recorder(user_data).record(
        StatusKind::LivelinessChanged,
        reader,
        i64::from((*status).alive_count),
    );
}

pub unsafe extern "C" fn on_data_available(reader: InstanceHandle, user_data: *mut c_void) {
    recorder(user_data).record(StatusKind::DataAvailable, reader, 0);
}

pub unsafe extern "C" fn on_subscription_matched(
    reader: InstanceHandle,
    status: *const HddsSubscriptionMatchedStatus,
    user_data: *mut c_void,
) {
    recorder(user_data).record(
        StatusKind::SubscriptionMatched,
        reader,
        i64::from((*status).current_count),
    );
}

pub unsafe extern "C" fn on_sample_lost(
    reader: InstanceHandle,
    status: *const HddsSampleLostStatus,
    user_data: *mut c_void,
) {
    recorder(user_data).record(
        StatusKind::SampleLost,
        reader,
        i64::from((*status).total_count),
    );
}

pub unsafe extern "C" fn on_data_on_readers(subscriber: InstanceHandle, user_data: *mut c_void) {
    recorder(user_data).record(StatusKind::DataOnReaders, subscriber, 0);
}
