macro_rules! assert_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
            Ok(_) => panic!("expected an error"),
        }
    };
}


mod callbacks;
mod device;

use crate::bridge::{BridgeContext, ConsumeParams, ProduceParams, TransportParams};
use crate::config::BridgeConfig;
use crate::descriptor::ManagedMethod;
use crate::engine::NativePtr;
use crate::error::{BridgeError, Result};
use crate::guard::ExceptionSink;
use crate::handle::Handle;
use crate::lifecycle::{self as bridge_lifecycle, BridgeSlot};
use crate::runtime::ManagedValue;
use fake_engine::{EngineState, FakeEngine};
use fake_runtime::{FakeObject, FakeRuntime};
use std::sync::Arc;

pub const ROUTER_CAPABILITIES: &str =
    r#"{"codecs":[{"kind":"audio","mimeType":"audio/opus","clockRate":48000,"channels":2}],"headerExtensions":[]}"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
pub struct RecordingSink {
    pub raised: Vec<BridgeError>,
}

impl ExceptionSink for RecordingSink {
    fn raise(&mut self, error: &BridgeError) {
        self.raised.push(error.clone());
    }
}

pub fn transport_params(id: &str) -> TransportParams<'_> {
    TransportParams {
        id: Some(id),
        ice_parameters: Some(r#"{"usernameFragment":"frag","password":"pw","iceLite":true}"#),
        ice_candidates: Some(r#"[{"foundation":"udpcandidate","ip":"10.0.0.1","port":40000}]"#),
        dtls_parameters: Some(r#"{"role":"auto","fingerprints":[]}"#),
        ..Default::default()
    }
}

/// An installed bridge over the fake runtime and engine.
pub struct Harness {
    pub runtime: FakeRuntime,
    pub engine: Arc<EngineState>,
    pub slot: BridgeSlot<FakeRuntime>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        init_logger();
        let runtime = FakeRuntime::new();
        let engine = Arc::new(EngineState::default());
        let slot = BridgeSlot::new();
        let built = runtime.clone();
        bridge_lifecycle::load(
            &slot,
            move || Ok(built),
            Arc::new(FakeEngine::new(Arc::clone(&engine))),
            config,
        )
        .unwrap();
        Self {
            runtime,
            engine,
            slot,
        }
    }

    pub fn context(&self) -> Arc<BridgeContext<FakeRuntime>> {
        self.slot.current().unwrap()
    }

    /// Runs `op` the way an entry point does, returning what was raised.
    pub fn enter<T, F>(&self, op: F) -> (Option<T>, Vec<BridgeError>)
    where
        F: FnOnce(&BridgeContext<FakeRuntime>) -> Result<T>,
    {
        let mut sink = RecordingSink::default();
        let value = self.slot.enter(&mut sink, |_, context| op(context));
        (value, sink.raised)
    }

    pub fn loaded_device(&self) -> Handle {
        let context = self.context();
        let device = context.create_device().unwrap();
        context
            .device_load(device, Some(ROUTER_CAPABILITIES), None, NativePtr(0xfac))
            .unwrap();
        device
    }

    /// A send transport whose application answers `onProduce` with `producer_id`.
    pub fn send_transport(&self, producer_id: &'static str) -> (FakeObject, FakeObject) {
        self.runtime
            .script(ManagedMethod::SendTransportOnProduce, move |_| {
                Ok(ManagedValue::Str(Some(producer_id.to_string())))
            });
        let device = self.loaded_device();
        let listener = self.runtime.object("send-listener");
        let wrapper = self
            .context()
            .create_send_transport(device, listener.clone(), transport_params("send-1"))
            .unwrap();
        (listener, wrapper)
    }

    pub fn recv_transport(&self) -> (FakeObject, FakeObject) {
        let device = self.loaded_device();
        let listener = self.runtime.object("recv-listener");
        let wrapper = self
            .context()
            .create_recv_transport(device, listener.clone(), transport_params("recv-1"))
            .unwrap();
        (listener, wrapper)
    }

    pub fn producer(&self, transport: Handle) -> FakeObject {
        let listener = self.runtime.object("producer-listener");
        self.context()
            .produce(
                transport,
                listener,
                ProduceParams {
                    track: NativePtr(0x7a),
                    ..Default::default()
                },
            )
            .unwrap()
    }

    pub fn consumer(&self, transport: Handle) -> FakeObject {
        let listener = self.runtime.object("consumer-listener");
        self.context()
            .consume(
                transport,
                listener,
                ConsumeParams {
                    id: Some("consumer-1"),
                    producer_id: Some("producer-1"),
                    kind: Some("audio"),
                    rtp_parameters: Some(r#"{"mid":"1","codecs":[]}"#),
                    app_data: None,
                },
            )
            .unwrap()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.slot.uninstall();
    }
}
