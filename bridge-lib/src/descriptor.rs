//! Descriptor registry
//!
//! Resolves every managed class and method the bridge invokes, once, when the
//! library is loaded. Lookups afterwards are infallible: a registry only exists
//! if every descriptor resolved.

use crate::error::{BridgeError, Result};
use log::debug;

/// Binary name of a class in the managed client package.
macro_rules! managed_class {
    ($name:literal) => {
        concat!("io/github/crow_misia/mediasoup/", $name)
    };
}
pub(crate) use managed_class;

/// Field descriptor of a class in the managed client package.
macro_rules! managed_param {
    ($name:literal) => {
        concat!("L", managed_class!($name), ";")
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedClass {
    Buffer,
    Consumer,
    DataConsumer,
    DataProducer,
    LogHandler,
    Producer,
    RecvTransport,
    SendTransport,
    ConsumerListener,
    DataConsumerListener,
    DataProducerListener,
    ProducerListener,
    SendTransportListener,
    TransportListener,
}

impl ManagedClass {
    pub const ALL: [ManagedClass; 14] = [
        Self::Buffer,
        Self::Consumer,
        Self::DataConsumer,
        Self::DataProducer,
        Self::LogHandler,
        Self::Producer,
        Self::RecvTransport,
        Self::SendTransport,
        Self::ConsumerListener,
        Self::DataConsumerListener,
        Self::DataProducerListener,
        Self::ProducerListener,
        Self::SendTransportListener,
        Self::TransportListener,
    ];

    pub fn binary_name(self) -> &'static str {
        match self {
            Self::Buffer => "org/webrtc/DataChannel$Buffer",
            Self::Consumer => managed_class!("Consumer"),
            Self::DataConsumer => managed_class!("DataConsumer"),
            Self::DataProducer => managed_class!("DataProducer"),
            Self::LogHandler => managed_class!("Logger$LogHandlerInterface"),
            Self::Producer => managed_class!("Producer"),
            Self::RecvTransport => managed_class!("RecvTransport"),
            Self::SendTransport => managed_class!("SendTransport"),
            Self::ConsumerListener => managed_class!("Consumer$Listener"),
            Self::DataConsumerListener => managed_class!("DataConsumer$Listener"),
            Self::DataProducerListener => managed_class!("DataProducer$Listener"),
            Self::ProducerListener => managed_class!("Producer$Listener"),
            Self::SendTransportListener => managed_class!("SendTransport$Listener"),
            Self::TransportListener => managed_class!("Transport$Listener"),
        }
    }
}

/// What a managed method hands back to native code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Void,
    Object,
    Constructor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedMethod {
    BufferInit,
    ConsumerInit,
    DataConsumerInit,
    DataProducerInit,
    ProducerInit,
    RecvTransportInit,
    SendTransportInit,
    ConsumerOnTransportClose,
    DataConsumerOnConnecting,
    DataConsumerOnOpen,
    DataConsumerOnClosing,
    DataConsumerOnClose,
    DataConsumerOnMessage,
    DataConsumerOnTransportClose,
    DataProducerOnOpen,
    DataProducerOnClose,
    DataProducerOnBufferedAmountChange,
    DataProducerOnTransportClose,
    ProducerOnTransportClose,
    TransportOnConnect,
    TransportOnConnectionStateChange,
    SendTransportOnProduce,
    SendTransportOnProduceData,
    LogHandlerOnLog,
}

/// Name and JVM signature of a managed method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub class: ManagedClass,
    pub name: &'static str,
    pub signature: &'static str,
    pub returns: ReturnKind,
}

impl ManagedMethod {
    pub const ALL: [ManagedMethod; 24] = [
        Self::BufferInit,
        Self::ConsumerInit,
        Self::DataConsumerInit,
        Self::DataProducerInit,
        Self::ProducerInit,
        Self::RecvTransportInit,
        Self::SendTransportInit,
        Self::ConsumerOnTransportClose,
        Self::DataConsumerOnConnecting,
        Self::DataConsumerOnOpen,
        Self::DataConsumerOnClosing,
        Self::DataConsumerOnClose,
        Self::DataConsumerOnMessage,
        Self::DataConsumerOnTransportClose,
        Self::DataProducerOnOpen,
        Self::DataProducerOnClose,
        Self::DataProducerOnBufferedAmountChange,
        Self::DataProducerOnTransportClose,
        Self::ProducerOnTransportClose,
        Self::TransportOnConnect,
        Self::TransportOnConnectionStateChange,
        Self::SendTransportOnProduce,
        Self::SendTransportOnProduceData,
        Self::LogHandlerOnLog,
    ];

    pub fn descriptor(self) -> MethodDescriptor {
        use ManagedClass as C;
        use ReturnKind::{Constructor, Object, Void};

        let (class, name, signature, returns) = match self {
            Self::BufferInit => (C::Buffer, "<init>", "(Ljava/nio/ByteBuffer;Z)V", Constructor),
            Self::ConsumerInit => (C::Consumer, "<init>", "(J)V", Constructor),
            Self::DataConsumerInit => (C::DataConsumer, "<init>", "(J)V", Constructor),
            Self::DataProducerInit => (C::DataProducer, "<init>", "(J)V", Constructor),
            Self::ProducerInit => (C::Producer, "<init>", "(J)V", Constructor),
            Self::RecvTransportInit => (C::RecvTransport, "<init>", "(J)V", Constructor),
            Self::SendTransportInit => (C::SendTransport, "<init>", "(J)V", Constructor),
            Self::ConsumerOnTransportClose => (
                C::ConsumerListener,
                "onTransportClose",
                concat!("(", managed_param!("Consumer"), ")V"),
                Void,
            ),
            Self::DataConsumerOnConnecting => (
                C::DataConsumerListener,
                "onConnecting",
                concat!("(", managed_param!("DataConsumer"), ")V"),
                Void,
            ),
            Self::DataConsumerOnOpen => (
                C::DataConsumerListener,
                "onOpen",
                concat!("(", managed_param!("DataConsumer"), ")V"),
                Void,
            ),
            Self::DataConsumerOnClosing => (
                C::DataConsumerListener,
                "onClosing",
                concat!("(", managed_param!("DataConsumer"), ")V"),
                Void,
            ),
            Self::DataConsumerOnClose => (
                C::DataConsumerListener,
                "onClose",
                concat!("(", managed_param!("DataConsumer"), ")V"),
                Void,
            ),
            Self::DataConsumerOnMessage => (
                C::DataConsumerListener,
                "onMessage",
                concat!(
                    "(",
                    managed_param!("DataConsumer"),
                    "Lorg/webrtc/DataChannel$Buffer;)V"
                ),
                Void,
            ),
            Self::DataConsumerOnTransportClose => (
                C::DataConsumerListener,
                "onTransportClose",
                concat!("(", managed_param!("DataConsumer"), ")V"),
                Void,
            ),
            Self::DataProducerOnOpen => (
                C::DataProducerListener,
                "onOpen",
                concat!("(", managed_param!("DataProducer"), ")V"),
                Void,
            ),
            Self::DataProducerOnClose => (
                C::DataProducerListener,
                "onClose",
                concat!("(", managed_param!("DataProducer"), ")V"),
                Void,
            ),
            Self::DataProducerOnBufferedAmountChange => (
                C::DataProducerListener,
                "onBufferedAmountChange",
                concat!("(", managed_param!("DataProducer"), "J)V"),
                Void,
            ),
            Self::DataProducerOnTransportClose => (
                C::DataProducerListener,
                "onTransportClose",
                concat!("(", managed_param!("DataProducer"), ")V"),
                Void,
            ),
            Self::ProducerOnTransportClose => (
                C::ProducerListener,
                "onTransportClose",
                concat!("(", managed_param!("Producer"), ")V"),
                Void,
            ),
            Self::TransportOnConnect => (
                C::TransportListener,
                "onConnect",
                concat!("(", managed_param!("Transport"), "Ljava/lang/String;)V"),
                Void,
            ),
            Self::TransportOnConnectionStateChange => (
                C::TransportListener,
                "onConnectionStateChange",
                concat!("(", managed_param!("Transport"), "Ljava/lang/String;)V"),
                Void,
            ),
            Self::SendTransportOnProduce => (
                C::SendTransportListener,
                "onProduce",
                concat!(
                    "(",
                    managed_param!("Transport"),
                    "Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;"
                ),
                Object,
            ),
            Self::SendTransportOnProduceData => (
                C::SendTransportListener,
                "onProduceData",
                concat!(
                    "(",
                    managed_param!("Transport"),
                    "Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;"
                ),
                Object,
            ),
            Self::LogHandlerOnLog => (
                C::LogHandler,
                "onLog",
                "(ILjava/lang/String;Ljava/lang/String;)V",
                Void,
            ),
        };

        MethodDescriptor {
            class,
            name,
            signature,
            returns,
        }
    }
}

/// Looks descriptors up in a live managed runtime.
pub trait DescriptorResolver {
    type Class;
    type Method: Copy;

    fn find_class(&mut self, binary_name: &str) -> Result<Self::Class>;

    fn find_method(
        &mut self,
        class: &Self::Class,
        name: &str,
        signature: &str,
    ) -> Result<Self::Method>;
}

/// Every class and method descriptor the bridge needs, fully resolved.
pub struct DescriptorRegistry<C, M> {
    classes: Vec<C>,
    methods: Vec<M>,
}

impl<C, M: Copy> DescriptorRegistry<C, M> {
    /// Resolves all descriptors or none.
    pub fn initialize<R>(resolver: &mut R) -> Result<Self>
    where
        R: DescriptorResolver<Class = C, Method = M>,
    {
        let mut classes = Vec::with_capacity(ManagedClass::ALL.len());
        for class in ManagedClass::ALL {
            let resolved = resolver.find_class(class.binary_name()).map_err(|e| {
                BridgeError::initialization(format!(
                    "error during FindClass {}: {}",
                    class.binary_name(),
                    e
                ))
            })?;
            classes.push(resolved);
        }

        let mut methods = Vec::with_capacity(ManagedMethod::ALL.len());
        for method in ManagedMethod::ALL {
            let descriptor = method.descriptor();
            let class = &classes[descriptor.class as usize];
            let resolved = resolver
                .find_method(class, descriptor.name, descriptor.signature)
                .map_err(|e| {
                    BridgeError::initialization(format!(
                        "error during GetMethodID {}.{}{}: {}",
                        descriptor.class.binary_name(),
                        descriptor.name,
                        descriptor.signature,
                        e
                    ))
                })?;
            methods.push(resolved);
        }

        debug!(
            "Resolved {} managed classes and {} methods",
            classes.len(),
            methods.len()
        );

        Ok(Self { classes, methods })
    }

    pub fn class(&self, class: ManagedClass) -> &C {
        &self.classes[class as usize]
    }

    pub fn method(&self, method: ManagedMethod) -> M {
        self.methods[method as usize]
    }
}
