use super::fake_runtime::Recorded;
use super::*;
use crate::bridge::ProduceDataParams;
use crate::engine::DataBuffer;
use std::collections::BTreeSet;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn test_produce_reply_is_returned_verbatim() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("abc123");
    let producer = harness.producer(transport.handle());

    assert_eq!(harness.context().producer_id(producer.handle()).unwrap(), "abc123");

    let calls = harness.runtime.calls_to(ManagedMethod::SendTransportOnProduce);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target, "send-listener");
    assert_eq!(calls[0].args[0], Recorded::Object(transport.label().to_string()));
    assert_eq!(calls[0].args[1], Recorded::Str("audio".into()));
    assert_eq!(calls[0].args[3], Recorded::Str("{}".into()));
    let rtp: serde_json::Value = serde_json::from_str(calls[0].args[2].as_str()).unwrap();
    assert_eq!(rtp["encodings"], serde_json::json!([]));
}

#[test]
fn test_reply_callbacks_run_off_the_calling_thread() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("p-1");
    harness.producer(transport.handle());

    let caller = thread::current().id();
    let connect = harness.runtime.calls_to(ManagedMethod::TransportOnConnect);
    let produce = harness.runtime.calls_to(ManagedMethod::SendTransportOnProduce);
    assert_eq!(connect.len(), 1);
    assert_ne!(connect[0].thread, caller);
    assert_ne!(produce[0].thread, caller);
}

#[test]
fn test_connect_is_requested_once() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("p-1");
    harness.producer(transport.handle());
    harness.producer(transport.handle());

    let connect = harness.runtime.calls_to(ManagedMethod::TransportOnConnect);
    assert_eq!(connect.len(), 1);
    let dtls: serde_json::Value = serde_json::from_str(connect[0].args[1].as_str()).unwrap();
    assert_eq!(dtls["role"], "auto");
    assert_eq!(harness.context().transport_connection_state(transport.handle()).unwrap(), "connected");
}

#[test]
fn test_null_produce_reply_fails_produce() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("unused");
    harness
        .runtime
        .script(ManagedMethod::SendTransportOnProduce, |_| Ok(ManagedValue::Str(None)));

    let (value, raised) = harness.enter(|context| {
        context.produce(
            transport.handle(),
            harness.runtime.object("producer-listener"),
            ProduceParams {
                track: NativePtr(1),
                ..Default::default()
            },
        )
    });
    assert!(value.is_none());
    assert_eq!(raised.len(), 1);
    assert!(raised[0].to_string().contains("callback returned null"));
    assert_eq!(harness.engine.created("producer"), 0);
}

#[test]
fn test_listener_exception_fails_request() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("unused");
    harness.runtime.script(ManagedMethod::TransportOnConnect, |_| {
        Err(BridgeError::managed("java.lang.RuntimeException: signaling down"))
    });

    let result = harness.context().produce(
        transport.handle(),
        harness.runtime.object("producer-listener"),
        ProduceParams {
            track: NativePtr(1),
            ..Default::default()
        },
    );
    match result {
        Err(BridgeError::NativeOperationFailed(message)) => {
            assert!(message.contains("signaling down"))
        }
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
    assert!(harness
        .runtime
        .calls_to(ManagedMethod::SendTransportOnProduce)
        .is_empty());
}

#[test]
fn test_listener_panic_fails_request() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("unused");
    harness
        .runtime
        .script(ManagedMethod::SendTransportOnProduce, |_| panic!("listener blew up"));

    let result = harness.context().produce(
        transport.handle(),
        harness.runtime.object("producer-listener"),
        ProduceParams {
            track: NativePtr(1),
            ..Default::default()
        },
    );
    assert_err!(result, BridgeError::NativeOperationFailed(_));

    // the dispatcher keeps serving requests
    harness
        .runtime
        .script(ManagedMethod::SendTransportOnProduce, |_| {
            Ok(ManagedValue::Str(Some("recovered".into())))
        });
    let producer = harness.producer(transport.handle());
    assert_eq!(harness.context().producer_id(producer.handle()).unwrap(), "recovered");
}

#[test]
fn test_produce_data_reply() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("unused");
    harness
        .runtime
        .script(ManagedMethod::SendTransportOnProduceData, |args| {
            assert_eq!(args[2], Recorded::Str("chat".into()));
            Ok(ManagedValue::Str(Some("dp-42".into())))
        });

    let data_producer = harness
        .context()
        .produce_data(
            transport.handle(),
            harness.runtime.object("data-producer-listener"),
            ProduceDataParams {
                label: Some("chat"),
                ordered: true,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(
        harness.context().data_producer_id(data_producer.handle()).unwrap(),
        "dp-42"
    );
}

#[test]
fn test_connection_state_change_is_forwarded() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("unused");

    harness
        .engine
        .send_transport_listener(0)
        .on_connection_state_change("failed");

    let calls = harness
        .runtime
        .calls_to(ManagedMethod::TransportOnConnectionStateChange);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target, "send-listener");
    assert_eq!(
        calls[0].args,
        vec![
            Recorded::Object(transport.label().to_string()),
            Recorded::Str("failed".into())
        ]
    );
}

#[test]
fn test_concurrent_events_are_delivered_once() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("unused");
    harness
        .runtime
        .script(ManagedMethod::SendTransportOnProduceData, |_| {
            Ok(ManagedValue::Str(Some("dp-1".into())))
        });
    harness
        .context()
        .produce_data(
            transport.handle(),
            harness.runtime.object("data-producer-listener"),
            ProduceDataParams::default(),
        )
        .unwrap();

    let emitters: Vec<_> = (0..2u64)
        .map(|t| {
            let listener = harness.engine.data_producer_listener(0);
            thread::spawn(move || {
                for i in 0..50u64 {
                    listener.on_buffered_amount_change(t * 50 + i);
                }
            })
        })
        .collect();
    for emitter in emitters {
        emitter.join().unwrap();
    }

    let amounts: Vec<i64> = harness
        .runtime
        .calls_to(ManagedMethod::DataProducerOnBufferedAmountChange)
        .into_iter()
        .map(|call| match call.args[1] {
            Recorded::Long(amount) => amount,
            ref other => panic!("unexpected argument {:?}", other),
        })
        .collect();
    assert_eq!(amounts.len(), 100);
    let distinct: BTreeSet<i64> = amounts.into_iter().collect();
    assert_eq!(distinct, (0..100).collect());
}

#[test]
fn test_events_after_dispose_are_dropped() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("p-1");
    let producer = harness.producer(transport.handle());

    let in_flight = harness.engine.producer_listener(0);
    harness
        .context()
        .dispose_producer(producer.handle())
        .unwrap();
    assert_eq!(harness.engine.dropped("producer"), 1);

    in_flight.on_transport_close();
    assert!(harness
        .runtime
        .calls_to(ManagedMethod::ProducerOnTransportClose)
        .is_empty());

    drop(in_flight);
    assert!(!harness.engine.producer_listener_alive(0));
}

#[test]
fn test_event_before_wrapper_registration_is_dropped() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("p-1");
    harness.engine.early_events.store(true, std::sync::atomic::Ordering::SeqCst);

    let producer = harness.producer(transport.handle());
    assert!(harness
        .runtime
        .calls_to(ManagedMethod::ProducerOnTransportClose)
        .is_empty());

    // registered by now
    harness.engine.producer_listener(0).on_transport_close();
    let calls = harness.runtime.calls_to(ManagedMethod::ProducerOnTransportClose);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec![Recorded::Object(producer.label().to_string())]);
}

#[test]
fn test_data_consumer_events() {
    let harness = Harness::new();
    let (_listener, transport) = harness.recv_transport();
    let data_consumer = harness
        .context()
        .consume_data(
            transport.handle(),
            harness.runtime.object("data-consumer-listener"),
            crate::bridge::ConsumeDataParams {
                id: Some("dc-1"),
                data_producer_id: Some("dp-1"),
                stream_id: 3,
                ..Default::default()
            },
        )
        .unwrap();

    let listener = harness.engine.data_consumer_listener(0);
    listener.on_connecting();
    listener.on_open();
    listener.on_message(&DataBuffer {
        data: b"hello",
        binary: false,
    });
    listener.on_closing();
    listener.on_close();

    let methods: Vec<ManagedMethod> = harness
        .runtime
        .calls()
        .into_iter()
        .filter(|call| call.target == "data-consumer-listener")
        .map(|call| call.method)
        .collect();
    assert_eq!(
        methods,
        vec![
            ManagedMethod::DataConsumerOnConnecting,
            ManagedMethod::DataConsumerOnOpen,
            ManagedMethod::DataConsumerOnMessage,
            ManagedMethod::DataConsumerOnClosing,
            ManagedMethod::DataConsumerOnClose,
        ]
    );
    let message = harness.runtime.calls_to(ManagedMethod::DataConsumerOnMessage);
    assert_eq!(
        message[0].args,
        vec![
            Recorded::Object(data_consumer.label().to_string()),
            Recorded::Buffer(b"hello".to_vec(), false)
        ]
    );
}

#[test]
fn test_hung_callback_blocks_caller() {
    let harness = Harness::new();
    let (_listener, transport) = harness.send_transport("unused");
    let (release, gate) = mpsc::channel::<()>();
    let gate = Mutex::new(gate);
    harness
        .runtime
        .script(ManagedMethod::SendTransportOnProduce, move |_| {
            let _ = gate.lock().unwrap().recv();
            Ok(ManagedValue::Str(Some("late".into())))
        });

    let context = harness.context();
    let listener = harness.runtime.object("producer-listener");
    let handle = transport.handle();
    let caller = thread::spawn(move || {
        context.produce(
            handle,
            listener,
            ProduceParams {
                track: NativePtr(1),
                ..Default::default()
            },
        )
    });

    thread::sleep(Duration::from_millis(100));
    assert!(!caller.is_finished());
    release.send(()).unwrap();
    let producer = caller.join().unwrap().unwrap();
    assert_eq!(harness.context().producer_id(producer.handle()).unwrap(), "late");
}
