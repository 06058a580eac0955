//! Native media engine interface
//!
//! The bridge never implements media negotiation. It drives an engine through
//! these traits and hands the engine listener objects that forward events to
//! managed code.

use crate::codec::Document;
use crate::dispatcher::PendingReply;
use crate::error::{BridgeError, NativeFault, Result};
use std::sync::Arc;

pub type NativeResult<T> = std::result::Result<T, NativeFault>;

/// Pointer owned by the host WebRTC stack. Never dereferenced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativePtr(pub i64);

impl NativePtr {
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Peer connection settings carried by load and transport creation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PeerConnectionOptions {
    pub configuration: Option<Document>,
    pub factory: NativePtr,
}

/// Data channel payload as a view over native memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataBuffer<'a> {
    pub data: &'a [u8],
    pub binary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl DataState {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Maps the managed `Logger.LogLevel.level` value.
    pub fn from_code(level: i32) -> Result<Self> {
        match level {
            0 => Ok(Self::None),
            1 => Ok(Self::Error),
            2 => Ok(Self::Warn),
            3 => Ok(Self::Debug),
            4 => Ok(Self::Trace),
            other => Err(BridgeError::invalid_argument(format!("log level {}", other))),
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportOptions {
    pub id: String,
    pub ice_parameters: Document,
    pub ice_candidates: Document,
    pub dtls_parameters: Document,
    pub sctp_parameters: Document,
    pub peer_connection: PeerConnectionOptions,
    pub app_data: Document,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProduceOptions {
    pub track: NativePtr,
    pub encodings: Document,
    pub codec_options: Document,
    pub codec: Option<Document>,
    pub app_data: Document,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProduceDataOptions {
    pub label: String,
    pub protocol: String,
    pub ordered: bool,
    pub max_retransmits: i32,
    pub max_packet_life_time: i32,
    pub app_data: Document,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsumeOptions {
    pub id: String,
    pub producer_id: String,
    pub kind: String,
    pub rtp_parameters: Document,
    pub app_data: Document,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsumeDataOptions {
    pub id: String,
    pub data_producer_id: String,
    pub stream_id: i32,
    pub label: String,
    pub protocol: String,
    pub app_data: Document,
}

pub trait MediaEngine: Send + Sync {
    fn initialize(&self) -> NativeResult<()>;
    fn cleanup(&self);
    fn new_device(&self) -> NativeResult<Box<dyn Device>>;
    /// Installs the process-wide log handler, or removes it with `None`.
    fn set_log_handler(&self, handler: Option<Arc<dyn LogHandler>>);
    fn set_log_level(&self, level: LogLevel);
}

pub trait Device: Send + Sync {
    fn is_loaded(&self) -> NativeResult<bool>;
    fn rtp_capabilities(&self) -> NativeResult<Document>;
    fn sctp_capabilities(&self) -> NativeResult<Document>;
    fn load(
        &self,
        router_rtp_capabilities: &Document,
        options: &PeerConnectionOptions,
    ) -> NativeResult<()>;
    fn can_produce(&self, kind: &str) -> NativeResult<bool>;
    fn create_send_transport(
        &self,
        listener: Arc<dyn SendTransportListener>,
        options: TransportOptions,
    ) -> NativeResult<Box<dyn SendTransport>>;
    fn create_recv_transport(
        &self,
        listener: Arc<dyn RecvTransportListener>,
        options: TransportOptions,
    ) -> NativeResult<Box<dyn RecvTransport>>;
}

pub trait Transport: Send + Sync {
    fn id(&self) -> NativeResult<String>;
    fn is_closed(&self) -> NativeResult<bool>;
    fn connection_state(&self) -> NativeResult<String>;
    fn app_data(&self) -> NativeResult<Document>;
    fn close(&self) -> NativeResult<()>;
    fn stats(&self) -> NativeResult<Document>;
    fn restart_ice(&self, ice_parameters: &Document) -> NativeResult<()>;
    fn update_ice_servers(&self, ice_servers: &Document) -> NativeResult<()>;
}

pub trait SendTransport: Transport {
    fn as_transport(&self) -> &dyn Transport;
    fn produce(
        &self,
        listener: Arc<dyn ProducerListener>,
        options: ProduceOptions,
    ) -> NativeResult<Box<dyn Producer>>;
    fn produce_data(
        &self,
        listener: Arc<dyn DataProducerListener>,
        options: ProduceDataOptions,
    ) -> NativeResult<Box<dyn DataProducer>>;
}

pub trait RecvTransport: Transport {
    fn as_transport(&self) -> &dyn Transport;
    fn consume(
        &self,
        listener: Arc<dyn ConsumerListener>,
        options: ConsumeOptions,
    ) -> NativeResult<Box<dyn Consumer>>;
    fn consume_data(
        &self,
        listener: Arc<dyn DataConsumerListener>,
        options: ConsumeDataOptions,
    ) -> NativeResult<Box<dyn DataConsumer>>;
}

pub trait Producer: Send + Sync {
    fn id(&self) -> NativeResult<String>;
    fn local_id(&self) -> NativeResult<String>;
    fn is_closed(&self) -> NativeResult<bool>;
    fn kind(&self) -> NativeResult<String>;
    fn rtp_sender(&self) -> NativeResult<NativePtr>;
    fn track(&self) -> NativeResult<NativePtr>;
    fn rtp_parameters(&self) -> NativeResult<Document>;
    fn is_paused(&self) -> NativeResult<bool>;
    fn max_spatial_layer(&self) -> NativeResult<i32>;
    fn set_max_spatial_layer(&self, spatial_layer: i32) -> NativeResult<()>;
    fn replace_track(&self, track: NativePtr) -> NativeResult<()>;
    fn app_data(&self) -> NativeResult<Document>;
    fn stats(&self) -> NativeResult<Document>;
    fn pause(&self) -> NativeResult<()>;
    fn resume(&self) -> NativeResult<()>;
    fn close(&self) -> NativeResult<()>;
}

pub trait Consumer: Send + Sync {
    fn id(&self) -> NativeResult<String>;
    fn local_id(&self) -> NativeResult<String>;
    fn producer_id(&self) -> NativeResult<String>;
    fn is_closed(&self) -> NativeResult<bool>;
    fn kind(&self) -> NativeResult<String>;
    fn rtp_receiver(&self) -> NativeResult<NativePtr>;
    fn track(&self) -> NativeResult<NativePtr>;
    fn rtp_parameters(&self) -> NativeResult<Document>;
    fn is_paused(&self) -> NativeResult<bool>;
    fn app_data(&self) -> NativeResult<Document>;
    fn stats(&self) -> NativeResult<Document>;
    fn pause(&self) -> NativeResult<()>;
    fn resume(&self) -> NativeResult<()>;
    fn close(&self) -> NativeResult<()>;
}

pub trait DataProducer: Send + Sync {
    fn id(&self) -> NativeResult<String>;
    fn local_id(&self) -> NativeResult<String>;
    fn sctp_stream_parameters(&self) -> NativeResult<Document>;
    fn ready_state(&self) -> NativeResult<DataState>;
    fn label(&self) -> NativeResult<String>;
    fn protocol(&self) -> NativeResult<String>;
    fn buffered_amount(&self) -> NativeResult<u64>;
    fn app_data(&self) -> NativeResult<Document>;
    fn is_closed(&self) -> NativeResult<bool>;
    fn close(&self) -> NativeResult<()>;
    fn send(&self, buffer: DataBuffer<'_>) -> NativeResult<()>;
}

pub trait DataConsumer: Send + Sync {
    fn id(&self) -> NativeResult<String>;
    fn local_id(&self) -> NativeResult<String>;
    fn data_producer_id(&self) -> NativeResult<String>;
    fn sctp_stream_parameters(&self) -> NativeResult<Document>;
    fn ready_state(&self) -> NativeResult<DataState>;
    fn label(&self) -> NativeResult<String>;
    fn protocol(&self) -> NativeResult<String>;
    fn app_data(&self) -> NativeResult<Document>;
    fn is_closed(&self) -> NativeResult<bool>;
    fn close(&self) -> NativeResult<()>;
}

pub trait TransportListener: Send + Sync {
    /// The engine blocks on the reply before continuing the DTLS handshake.
    fn on_connect(&self, dtls_parameters: &Document) -> PendingReply<()>;
    fn on_connection_state_change(&self, connection_state: &str);
}

pub trait SendTransportListener: TransportListener {
    /// Resolves to the server-side producer id.
    fn on_produce(
        &self,
        kind: &str,
        rtp_parameters: &Document,
        app_data: &Document,
    ) -> PendingReply<String>;

    /// Resolves to the server-side data producer id.
    fn on_produce_data(
        &self,
        sctp_stream_parameters: &Document,
        label: &str,
        protocol: &str,
        app_data: &Document,
    ) -> PendingReply<String>;
}

pub trait RecvTransportListener: TransportListener {}

pub trait ProducerListener: Send + Sync {
    fn on_transport_close(&self);
}

pub trait ConsumerListener: Send + Sync {
    fn on_transport_close(&self);
}

pub trait DataProducerListener: Send + Sync {
    fn on_open(&self);
    fn on_close(&self);
    fn on_buffered_amount_change(&self, sent_data_size: u64);
    fn on_transport_close(&self);
}

pub trait DataConsumerListener: Send + Sync {
    fn on_connecting(&self);
    fn on_open(&self);
    fn on_closing(&self);
    fn on_close(&self);
    fn on_message(&self, buffer: &DataBuffer<'_>);
    fn on_transport_close(&self);
}

pub trait LogHandler: Send + Sync {
    fn on_log(&self, level: LogLevel, message: &str);
}
