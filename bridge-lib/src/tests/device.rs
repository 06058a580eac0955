use super::*;
use crate::engine::PeerConnectionOptions;
use crate::error::{ILLEGAL_STATE_EXCEPTION_CLASS, MEDIASOUP_EXCEPTION_CLASS};
use serde_json::{json, Value};

#[test]
fn test_load_and_capabilities() {
    let harness = Harness::new();
    let context = harness.context();
    let device = context.create_device().unwrap();
    assert!(!context.device_is_loaded(device).unwrap());

    context
        .device_load(
            device,
            Some(ROUTER_CAPABILITIES),
            Some(r#"{"iceServers":[{"urls":["stun:stun.l.google.com:19302"]}]}"#),
            NativePtr(0xfac),
        )
        .unwrap();
    assert!(context.device_is_loaded(device).unwrap());

    let rtp: Value = serde_json::from_str(&context.device_rtp_capabilities(device).unwrap()).unwrap();
    assert_eq!(rtp["codecs"][0]["mimeType"], "audio/opus");
    let sctp: Value =
        serde_json::from_str(&context.device_sctp_capabilities(device).unwrap()).unwrap();
    assert_eq!(sctp["numStreams"]["OS"], 1024);

    let loads = harness.engine.loads.lock().unwrap();
    assert_eq!(loads[0].0["codecs"][0]["channels"], 2);
    assert_eq!(
        loads[0].1,
        PeerConnectionOptions {
            configuration: Some(json!({"iceServers": [{"urls": ["stun:stun.l.google.com:19302"]}]})),
            factory: NativePtr(0xfac),
        }
    );
}

#[test]
fn test_load_rejects_bad_capabilities() {
    let harness = Harness::new();
    let context = harness.context();
    let device = context.create_device().unwrap();

    assert_err!(
        context.device_load(device, None, None, NativePtr::default()),
        BridgeError::NullArgument("routerRtpCapabilities")
    );
    assert_err!(
        context.device_load(device, Some("{\"codecs\":"), None, NativePtr::default()),
        BridgeError::MalformedPayload(_)
    );
    assert_err!(
        context.device_load(device, Some(ROUTER_CAPABILITIES), Some("[1,"), NativePtr::default()),
        BridgeError::MalformedPayload(_)
    );
    assert!(!context.device_is_loaded(device).unwrap());
    assert!(harness.engine.loads.lock().unwrap().is_empty());
}

#[test]
fn test_can_produce() {
    let harness = Harness::new();
    let context = harness.context();
    let device = context.create_device().unwrap();
    assert_err!(
        context.device_can_produce(device, "audio"),
        BridgeError::NativeOperationFailed(_)
    );

    context
        .device_load(device, Some(ROUTER_CAPABILITIES), None, NativePtr::default())
        .unwrap();
    assert!(context.device_can_produce(device, "audio").unwrap());
    assert!(!context.device_can_produce(device, "video").unwrap());
    assert_eq!(
        context.device_can_produce(device, "data").unwrap_err(),
        BridgeError::native("invalid kind \"data\"")
    );
}

#[test]
fn test_dispose_device_once() {
    let harness = Harness::new();
    let context = harness.context();
    let device = context.create_device().unwrap();
    assert_eq!(harness.engine.alive("device"), 1);

    context.dispose_device(device).unwrap();
    assert_eq!(harness.engine.dropped("device"), 1);
    assert_eq!(
        context.dispose_device(device).unwrap_err(),
        BridgeError::invalid_handle("device", device)
    );
    assert_err!(
        context.device_is_loaded(device),
        BridgeError::InvalidHandle { kind: "device", .. }
    );
    assert_eq!(harness.engine.dropped("device"), 1);
}

#[test]
fn test_native_fault_raises_one_exception() {
    let harness = Harness::new();
    harness.engine.fail("engine.new_device", "no peer connection factory");

    let (value, raised) = harness.enter(|context| context.create_device());
    assert_eq!(value, None);
    assert_eq!(raised, vec![BridgeError::native("no peer connection factory")]);
    assert_eq!(raised[0].managed_class(), MEDIASOUP_EXCEPTION_CLASS);
}

#[test]
fn test_native_panic_raises_one_exception() {
    let harness = Harness::new();
    let device = harness.loaded_device();
    harness.engine.panic_on("device.is_loaded", "access violation");

    let (value, raised) = harness.enter(|context| context.device_is_loaded(device));
    assert_eq!(value, None);
    assert_eq!(raised, vec![BridgeError::native("access violation")]);

    // the bridge stays usable
    harness.engine.heal("device.is_loaded");
    let (value, raised) = harness.enter(|context| context.device_is_loaded(device));
    assert_eq!(value, Some(true));
    assert!(raised.is_empty());
}

#[test]
fn test_stale_handle_is_illegal_state() {
    let harness = Harness::new();
    let (value, raised) = harness.enter(|context| context.device_rtp_capabilities(77));
    assert_eq!(value, None);
    assert_eq!(raised.len(), 1);
    assert_eq!(raised[0].managed_class(), ILLEGAL_STATE_EXCEPTION_CLASS);
}
