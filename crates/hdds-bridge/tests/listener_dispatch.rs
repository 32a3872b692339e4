// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::missing_panics_doc)] // Tests panic on failure
#![allow(clippy::items_after_statements)] // Test helpers

//! Listener dispatch through the C ABI.
//!
//! Events are raised by the mock provider on its own threads and must reach
//! the caller's callback table on bridge worker threads, never after the
//! listener has been disposed.

mod common;

use std::os::raw::c_void;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

use common::{Harness, Recorder, PARTICIPANT, READER, SUBSCRIBER, TOPIC, WORKER_PREFIX, WRITER};
use hdds_bridge::listener::participant::{
    hdds_domain_participant_set_listener, hdds_participant_listener_create,
    hdds_participant_listener_destroy,
};
use hdds_bridge::listener::publisher::{
    hdds_publisher_listener_create, hdds_publisher_listener_destroy, hdds_publisher_set_listener,
};
use hdds_bridge::listener::reader::{
    hdds_data_reader_listener_create, hdds_data_reader_listener_destroy,
    hdds_data_reader_listener_dispose, hdds_data_reader_listener_is_disposed,
    hdds_data_reader_set_listener,
};
use hdds_bridge::listener::subscriber::{
    hdds_subscriber_listener_create, hdds_subscriber_listener_destroy,
    hdds_subscriber_set_listener,
};
use hdds_bridge::listener::topic::{
    hdds_topic_listener_create, hdds_topic_listener_destroy, hdds_topic_set_listener,
};
use hdds_bridge::listener::writer::{
    hdds_data_writer_listener_create, hdds_data_writer_listener_destroy,
    hdds_data_writer_set_listener,
};
use hdds_bridge::listener::{
    DataReaderListenerBridge, HddsDataReaderCallbacks, HddsDataReaderListener, HddsDataReaderListenerCallbacks,
    HddsDataWriterCallbacks, HddsDataWriterListenerCallbacks, HddsParticipantListenerCallbacks,
    HddsPublisherListenerCallbacks, HddsSubscriberListenerCallbacks, HddsTopicCallbacks,
    HddsTopicListenerCallbacks,
};
use hdds_bridge::native::status::{
    InconsistentTopicStatus, OfferedIncompatibleQosStatus, PublicationMatchedStatus,
    QosPolicyCount, RequestedIncompatibleQosStatus, SampleLostStatus, SubscriptionMatchedStatus,
    DURABILITY_QOS_POLICY_ID, RELIABILITY_QOS_POLICY_ID,
};
use hdds_bridge::native::{
    DataReader, DataReaderListener, DataWriterListener, SubscriberListener, TopicListener,
};
use hdds_bridge::status::HddsPublicationMatchedStatus;
use hdds_bridge::{
    BridgeRuntime, InstanceHandle, ListenerBridge, ReturnCode, StatusKind, StatusMask,
};

fn reader_callbacks(recorder: &Arc<Recorder>) -> HddsDataReaderListenerCallbacks {
    HddsDataReaderListenerCallbacks {
        reader: HddsDataReaderCallbacks {
            on_data_available: Some(common::on_data_available),
            on_subscription_matched: Some(common::on_subscription_matched),
            on_requested_incompatible_qos: Some(common::on_requested_incompatible_qos),
            ..Default::default()
        },
        user_data: recorder.user_data(),
    }
}

unsafe fn attach_reader_listener(
    h: &Harness,
    callbacks: &HddsDataReaderListenerCallbacks,
    mask: StatusMask,
) -> *mut HddsDataReaderListener {
    let listener = hdds_data_reader_listener_create(h.runtime, callbacks);
    assert!(!listener.is_null());
    assert_eq!(
        hdds_data_reader_set_listener(h.runtime, READER, listener, mask),
        ReturnCode::Ok
    );
    listener
}

#[test]
fn reader_events_run_on_worker_threads() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = reader_callbacks(&recorder);

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, StatusMask::ALL);

        let provider = {
            let reader = Arc::clone(&h.reader);
            thread::spawn(move || {
                assert!(reader.data_available());
                reader.notify(StatusKind::SubscriptionMatched, |l| {
                    l.on_subscription_matched(
                        READER,
                        SubscriptionMatchedStatus {
                            current_count: 4,
                            ..Default::default()
                        },
                    );
                });
            })
        };
        provider.join().expect("provider thread");

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].kind, StatusKind::DataAvailable);
        assert_eq!(calls[1].kind, StatusKind::SubscriptionMatched);
        assert_eq!(calls[1].value, 4);
        for call in &calls {
            assert_eq!(call.entity, READER);
            let thread = call.thread.as_deref().expect("named worker");
            assert!(thread.starts_with(WORKER_PREFIX), "ran on {thread}");
        }

        hdds_data_reader_listener_destroy(listener);
    }
}

#[test]
fn concurrent_provider_threads_all_delivered() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = reader_callbacks(&recorder);

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, StatusMask::ALL);

        let providers: Vec<_> = (0..8)
            .map(|_| {
                let reader = Arc::clone(&h.reader);
                thread::spawn(move || {
                    for _ in 0..10 {
                        reader.data_available();
                    }
                })
            })
            .collect();
        for provider in providers {
            provider.join().expect("provider thread");
        }

        assert_eq!(recorder.count(StatusKind::DataAvailable), 80);
        hdds_data_reader_listener_destroy(listener);
    }
}

#[test]
fn dispose_waits_for_running_callback() {
    let h = Harness::new();
    let recorder = Recorder::with_delay(Duration::from_millis(150));
    let callbacks = reader_callbacks(&recorder);

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, StatusMask::ALL);

        let provider = {
            let reader = Arc::clone(&h.reader);
            thread::spawn(move || reader.data_available())
        };
        assert!(recorder.wait_started(1));

        assert_eq!(hdds_data_reader_listener_dispose(listener), ReturnCode::Ok);
        // Nothing of this listener runs once dispose has returned.
        assert_eq!(recorder.finished.load(Ordering::SeqCst), 1);
        assert!(hdds_data_reader_listener_is_disposed(listener));

        // The provider still holds the listener; later events are dropped.
        assert!(h.reader.data_available());
        assert_eq!(recorder.started.load(Ordering::SeqCst), 1);

        assert!(provider.join().expect("provider thread"));
        hdds_data_reader_listener_destroy(listener);
    }
}

#[test]
fn dispose_is_idempotent() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = reader_callbacks(&recorder);

    unsafe {
        let listener = hdds_data_reader_listener_create(h.runtime, &callbacks);
        assert!(!hdds_data_reader_listener_is_disposed(listener));
        assert_eq!(hdds_data_reader_listener_dispose(listener), ReturnCode::Ok);
        assert_eq!(hdds_data_reader_listener_dispose(listener), ReturnCode::Ok);
        assert!(hdds_data_reader_listener_is_disposed(listener));
        hdds_data_reader_listener_destroy(listener);
    }
}

unsafe extern "C" fn dispose_from_callback(reader: InstanceHandle, user_data: *mut c_void) {
    let recorder = common::recorder(user_data);
    recorder.record(StatusKind::DataAvailable, reader, 0);
    let listener = recorder.listener.load(Ordering::SeqCst);
    let rc = hdds_data_reader_listener_dispose(listener.cast::<HddsDataReaderListener>());
    assert_eq!(rc, ReturnCode::Ok);
}

#[test]
fn dispose_from_inside_callback_returns() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = HddsDataReaderListenerCallbacks {
        reader: HddsDataReaderCallbacks {
            on_data_available: Some(dispose_from_callback),
            ..Default::default()
        },
        user_data: recorder.user_data(),
    };

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, StatusMask::ALL);
        recorder
            .listener
            .store(listener.cast::<c_void>(), Ordering::SeqCst);

        let provider = {
            let reader = Arc::clone(&h.reader);
            thread::spawn(move || {
                reader.data_available();
                reader.data_available();
            })
        };
        provider.join().expect("provider thread");

        assert!(hdds_data_reader_listener_is_disposed(listener));
        assert_eq!(recorder.count(StatusKind::DataAvailable), 1);
        hdds_data_reader_listener_destroy(listener);
    }
}

/// Shared by two listeners: the writer listener's slot disposes `target`.
struct CrossDispose {
    target: OnceLock<Arc<DataReaderListenerBridge>>,
    writer_entered: AtomicBool,
    dispose_returned: AtomicBool,
    reader_calls: AtomicUsize,
    reader_calls_after_dispose: AtomicUsize,
}

unsafe extern "C" fn dispose_other_listener(
    _writer: InstanceHandle,
    _status: *const HddsPublicationMatchedStatus,
    user_data: *mut c_void,
) {
    let ctx = &*user_data.cast::<CrossDispose>();
    let Some(target) = ctx.target.get() else {
        return;
    };
    ctx.writer_entered.store(true, Ordering::SeqCst);

    // Wait for the reader event to be counted and queued behind this call.
    let deadline = Instant::now() + Duration::from_secs(2);
    while target.core().in_flight() == 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    target.dispose();
    ctx.dispose_returned.store(true, Ordering::SeqCst);
}

unsafe extern "C" fn count_reader_call(_reader: InstanceHandle, user_data: *mut c_void) {
    let ctx = &*user_data.cast::<CrossDispose>();
    ctx.reader_calls.fetch_add(1, Ordering::SeqCst);
    if ctx.dispose_returned.load(Ordering::SeqCst) {
        ctx.reader_calls_after_dispose.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn dispose_of_other_listener_from_callback_drops_its_queued_call() {
    // A single worker: the reader call can only run after the writer slot.
    let h = Harness::with_workers(1);
    let runtime = unsafe { BridgeRuntime::from_handle(h.runtime) }.expect("runtime");

    let ctx = Box::new(CrossDispose {
        target: OnceLock::new(),
        writer_entered: AtomicBool::new(false),
        dispose_returned: AtomicBool::new(false),
        reader_calls: AtomicUsize::new(0),
        reader_calls_after_dispose: AtomicUsize::new(0),
    });
    let user_data = ptr::addr_of!(*ctx).cast_mut().cast::<c_void>();
    let target = DataReaderListenerBridge::new(
        runtime,
        HddsDataReaderListenerCallbacks {
            reader: HddsDataReaderCallbacks {
                on_data_available: Some(count_reader_call),
                ..Default::default()
            },
            user_data,
        },
    );
    assert!(ctx.target.set(Arc::clone(&target)).is_ok());
    let writer_callbacks = HddsDataWriterListenerCallbacks {
        writer: HddsDataWriterCallbacks {
            on_publication_matched: Some(dispose_other_listener),
            ..Default::default()
        },
        user_data,
    };

    unsafe {
        let writer_listener = hdds_data_writer_listener_create(h.runtime, &writer_callbacks);
        assert_eq!(
            hdds_data_writer_set_listener(h.runtime, WRITER, writer_listener, StatusMask::ALL),
            ReturnCode::Ok
        );
        let attached: Arc<dyn DataReaderListener> = target.clone();
        assert_eq!(
            h.reader.set_listener(Some(attached), StatusMask::ALL),
            ReturnCode::Ok
        );

        let writer_side = {
            let writer = Arc::clone(&h.writer);
            thread::spawn(move || {
                writer.notify(StatusKind::PublicationMatched, |l| {
                    l.on_publication_matched(WRITER, PublicationMatchedStatus::default());
                })
            })
        };
        let deadline = Instant::now() + Duration::from_secs(2);
        while !ctx.writer_entered.load(Ordering::SeqCst) {
            assert!(Instant::now() < deadline, "writer slot never started");
            thread::sleep(Duration::from_millis(1));
        }
        let reader_side = {
            let reader = Arc::clone(&h.reader);
            thread::spawn(move || reader.data_available())
        };

        assert!(writer_side.join().expect("writer provider thread"));
        assert!(reader_side.join().expect("reader provider thread"));

        assert!(ctx.dispose_returned.load(Ordering::SeqCst));
        assert!(target.is_disposed());
        assert_eq!(target.core().in_flight(), 0);
        assert_eq!(ctx.reader_calls_after_dispose.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.reader_calls.load(Ordering::SeqCst), 0);

        hdds_data_writer_listener_destroy(writer_listener);
    }
    assert_eq!(
        h.reader.set_listener(None, StatusMask::default()),
        ReturnCode::Ok
    );
}

#[test]
fn null_slot_is_skipped() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = HddsDataReaderListenerCallbacks {
        reader: HddsDataReaderCallbacks {
            on_data_available: Some(common::on_data_available),
            ..Default::default()
        },
        user_data: recorder.user_data(),
    };

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, StatusMask::ALL);

        // The provider calls the listener; the bridge has nothing to forward.
        assert!(h.reader.notify(StatusKind::SampleLost, |l| {
            l.on_sample_lost(READER, SampleLostStatus::default());
        }));
        assert!(recorder.calls().is_empty());

        assert!(h.reader.data_available());
        assert_eq!(recorder.count(StatusKind::DataAvailable), 1);
        hdds_data_reader_listener_destroy(listener);
    }
}

#[test]
fn mask_is_forwarded_to_provider() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = reader_callbacks(&recorder);
    let mask = StatusMask::NONE.with(StatusKind::DataAvailable);

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, mask);

        assert!(!h.reader.notify(StatusKind::SubscriptionMatched, |_| {}));
        assert!(h.reader.data_available());
        assert_eq!(recorder.calls().len(), 1);

        // Detach.
        assert_eq!(
            hdds_data_reader_set_listener(h.runtime, READER, ptr::null(), StatusMask::NONE),
            ReturnCode::Ok
        );
        assert!(!h.reader.listener.is_attached());
        hdds_data_reader_listener_destroy(listener);
    }
}

#[test]
fn incompatible_qos_policies_visible_during_call() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = HddsDataWriterListenerCallbacks {
        writer: HddsDataWriterCallbacks {
            on_offered_incompatible_qos: Some(common::on_offered_incompatible_qos),
            ..Default::default()
        },
        user_data: recorder.user_data(),
    };
    let status = OfferedIncompatibleQosStatus {
        total_count: 2,
        total_count_change: 1,
        last_policy_id: RELIABILITY_QOS_POLICY_ID,
        policies: vec![
            QosPolicyCount {
                policy_id: DURABILITY_QOS_POLICY_ID,
                count: 2,
            },
            QosPolicyCount {
                policy_id: RELIABILITY_QOS_POLICY_ID,
                count: 3,
            },
        ],
    };

    unsafe {
        let listener = hdds_data_writer_listener_create(h.runtime, &callbacks);
        assert_eq!(
            hdds_data_writer_set_listener(h.runtime, WRITER, listener, StatusMask::ALL),
            ReturnCode::Ok
        );

        assert!(h.writer.notify(StatusKind::OfferedIncompatibleQos, |l| {
            l.on_offered_incompatible_qos(WRITER, status.clone());
        }));

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].entity, WRITER);
        assert_eq!(calls[0].value, 5);
        hdds_data_writer_listener_destroy(listener);
    }
}

#[test]
fn requested_incompatible_qos_with_empty_policy_list() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = reader_callbacks(&recorder);

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, StatusMask::ALL);
        assert!(h.reader.notify(StatusKind::RequestedIncompatibleQos, |l| {
            l.on_requested_incompatible_qos(READER, RequestedIncompatibleQosStatus::default());
        }));
        assert_eq!(recorder.count(StatusKind::RequestedIncompatibleQos), 1);
        assert_eq!(recorder.calls()[0].value, 0);
        hdds_data_reader_listener_destroy(listener);
    }
}

#[test]
fn topic_listener_receives_inconsistent_topic() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = HddsTopicListenerCallbacks {
        topic: HddsTopicCallbacks {
            on_inconsistent_topic: Some(common::on_inconsistent_topic),
        },
        user_data: recorder.user_data(),
    };

    unsafe {
        let listener = hdds_topic_listener_create(h.runtime, &callbacks);
        assert_eq!(
            hdds_topic_set_listener(h.runtime, TOPIC, listener, StatusMask::ALL),
            ReturnCode::Ok
        );

        let topic = Arc::clone(&h.topic);
        thread::spawn(move || {
            topic.notify_inconsistent(InconsistentTopicStatus {
                total_count: 3,
                total_count_change: 1,
            })
        })
        .join()
        .expect("provider thread");

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].entity, TOPIC);
        assert_eq!(calls[0].value, 3);
        hdds_topic_listener_destroy(listener);
    }
}

#[test]
fn publisher_listener_receives_writer_events() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = HddsPublisherListenerCallbacks {
        writer: HddsDataWriterCallbacks {
            on_publication_matched: Some(common::on_publication_matched),
            ..Default::default()
        },
        user_data: recorder.user_data(),
    };

    unsafe {
        let listener = hdds_publisher_listener_create(h.runtime, &callbacks);
        assert_eq!(
            hdds_publisher_set_listener(h.runtime, common::PUBLISHER, listener, StatusMask::ALL),
            ReturnCode::Ok
        );

        assert!(h.publisher.notify(StatusKind::PublicationMatched, |l| {
            l.on_publication_matched(
                WRITER,
                PublicationMatchedStatus {
                    current_count: 2,
                    ..Default::default()
                },
            );
        }));

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].entity, WRITER);
        assert_eq!(calls[0].value, 2);
        hdds_publisher_listener_destroy(listener);
    }
}

#[test]
fn subscriber_listener_receives_data_on_readers() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = HddsSubscriberListenerCallbacks {
        reader: HddsDataReaderCallbacks {
            on_data_available: Some(common::on_data_available),
            ..Default::default()
        },
        on_data_on_readers: Some(common::on_data_on_readers),
        user_data: recorder.user_data(),
    };

    unsafe {
        let listener = hdds_subscriber_listener_create(h.runtime, &callbacks);
        assert_eq!(
            hdds_subscriber_set_listener(h.runtime, SUBSCRIBER, listener, StatusMask::ALL),
            ReturnCode::Ok
        );

        h.subscriber
            .notify(StatusKind::DataOnReaders, |l| l.on_data_on_readers(SUBSCRIBER));
        h.subscriber
            .notify(StatusKind::DataAvailable, |l| l.on_data_available(READER));

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            (calls[0].kind, calls[0].entity),
            (StatusKind::DataOnReaders, SUBSCRIBER)
        );
        assert_eq!((calls[1].kind, calls[1].entity), (StatusKind::DataAvailable, READER));
        hdds_subscriber_listener_destroy(listener);
    }
}

#[test]
fn participant_listener_routes_every_entity_kind() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = HddsParticipantListenerCallbacks {
        topic: HddsTopicCallbacks {
            on_inconsistent_topic: Some(common::on_inconsistent_topic),
        },
        writer: HddsDataWriterCallbacks {
            on_publication_matched: Some(common::on_publication_matched),
            ..Default::default()
        },
        reader: HddsDataReaderCallbacks {
            on_liveliness_changed: Some(common::on_liveliness_changed),
            ..Default::default()
        },
        on_data_on_readers: Some(common::on_data_on_readers),
        user_data: recorder.user_data(),
    };

    unsafe {
        let listener = hdds_participant_listener_create(h.runtime, &callbacks);
        assert_eq!(
            hdds_domain_participant_set_listener(
                h.runtime,
                PARTICIPANT,
                listener,
                StatusMask::ALL
            ),
            ReturnCode::Ok
        );

        let attached = h
            .participant
            .listener
            .enabled_for(StatusKind::InconsistentTopic)
            .expect("participant listener");
        attached.on_inconsistent_topic(TOPIC, InconsistentTopicStatus::default());
        attached.on_publication_matched(WRITER, PublicationMatchedStatus::default());
        attached.on_liveliness_changed(READER, Default::default());
        attached.on_data_on_readers(SUBSCRIBER);
        // No slot for this one.
        attached.on_sample_lost(READER, SampleLostStatus::default());

        let seen: Vec<_> = recorder
            .calls()
            .iter()
            .map(|c| (c.kind, c.entity))
            .collect();
        assert_eq!(
            seen,
            vec![
                (StatusKind::InconsistentTopic, TOPIC),
                (StatusKind::PublicationMatched, WRITER),
                (StatusKind::LivelinessChanged, READER),
                (StatusKind::DataOnReaders, SUBSCRIBER),
            ]
        );

        drop(attached);
        hdds_participant_listener_destroy(listener);
    }
}

#[test]
fn destroyed_listener_still_held_by_provider_drops_events() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = reader_callbacks(&recorder);

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, StatusMask::ALL);
        hdds_data_reader_listener_destroy(listener);
    }

    assert!(h.reader.listener.is_attached());
    assert!(h.reader.data_available());
    assert!(recorder.calls().is_empty());
}

#[test]
fn listener_outlives_runtime() {
    let h = Harness::new();
    let reader = Arc::clone(&h.reader);
    let recorder = Recorder::new();
    let callbacks = reader_callbacks(&recorder);

    unsafe {
        let listener = attach_reader_listener(&h, &callbacks, StatusMask::ALL);
        drop(h);

        assert!(reader.data_available());
        assert_eq!(recorder.count(StatusKind::DataAvailable), 1);
        hdds_data_reader_listener_destroy(listener);
    }
}

#[test]
fn bad_arguments_rejected() {
    let h = Harness::new();
    let recorder = Recorder::new();
    let callbacks = reader_callbacks(&recorder);

    unsafe {
        assert!(hdds_data_reader_listener_create(ptr::null(), &callbacks).is_null());
        assert!(hdds_data_reader_listener_create(h.runtime, ptr::null()).is_null());
        assert_eq!(
            hdds_data_reader_listener_dispose(ptr::null()),
            ReturnCode::BadParameter
        );
        assert!(hdds_data_reader_listener_is_disposed(ptr::null()));
        hdds_data_reader_listener_destroy(ptr::null_mut());

        let listener = hdds_data_reader_listener_create(h.runtime, &callbacks);
        assert_eq!(
            hdds_data_reader_set_listener(ptr::null(), READER, listener, StatusMask::ALL),
            ReturnCode::BadParameter
        );
        assert_eq!(
            hdds_data_reader_set_listener(
                h.runtime,
                InstanceHandle(0xdead),
                listener,
                StatusMask::ALL
            ),
            ReturnCode::BadParameter
        );
        // A writer handle is not a reader.
        assert_eq!(
            hdds_data_reader_set_listener(h.runtime, WRITER, listener, StatusMask::ALL),
            ReturnCode::BadParameter
        );
        assert!(!h.reader.listener.is_attached());
        hdds_data_reader_listener_destroy(listener);
    }
}
