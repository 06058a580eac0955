//! Boundary operations
//!
//! [`BridgeContext`] owns every handle table and the shared collaborators. Its
//! methods are the entry points minus the host calling convention: they take
//! handles and payload strings, and return `Result`.

mod consumer;
mod data_consumer;
mod data_producer;
mod device;
mod logger;
mod producer;
mod transport;

pub use device::TransportParams;
pub use transport::{ConsumeDataParams, ConsumeParams, ProduceDataParams, ProduceParams};

use crate::config::BridgeConfig;
use crate::descriptor::ManagedMethod;
use crate::dispatcher::Dispatcher;
use crate::engine::{
    Consumer, DataConsumer, DataProducer, Device, MediaEngine, Producer, RecvTransport,
    SendTransport, Transport,
};
use crate::error::{BridgeError, Result};
use crate::handle::{Handle, HandleTable, OwnedUnit, NULL_HANDLE};
use crate::runtime::ManagedRuntime;
use crate::trampoline::{
    ConsumerTrampoline, DataConsumerTrampoline, DataProducerTrampoline, LogTrampoline,
    ProducerTrampoline, Trampoline, TransportTrampoline,
};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

pub enum TransportObject {
    Send(Box<dyn SendTransport>),
    Recv(Box<dyn RecvTransport>),
}

impl TransportObject {
    pub fn transport(&self) -> &dyn Transport {
        match self {
            Self::Send(transport) => transport.as_transport(),
            Self::Recv(transport) => transport.as_transport(),
        }
    }
}

pub type TransportUnit<R> = OwnedUnit<TransportObject, Arc<TransportTrampoline<R>>>;
pub type ProducerUnit<R> = OwnedUnit<Box<dyn Producer>, Arc<ProducerTrampoline<R>>>;
pub type ConsumerUnit<R> = OwnedUnit<Box<dyn Consumer>, Arc<ConsumerTrampoline<R>>>;
pub type DataProducerUnit<R> = OwnedUnit<Box<dyn DataProducer>, Arc<DataProducerTrampoline<R>>>;
pub type DataConsumerUnit<R> = OwnedUnit<Box<dyn DataConsumer>, Arc<DataConsumerTrampoline<R>>>;

pub struct BridgeContext<R: ManagedRuntime> {
    runtime: Arc<R>,
    engine: Arc<dyn MediaEngine>,
    dispatcher: Arc<Dispatcher>,
    config: BridgeConfig,
    devices: HandleTable<Box<dyn Device>>,
    transports: HandleTable<TransportUnit<R>>,
    producers: HandleTable<ProducerUnit<R>>,
    consumers: HandleTable<ConsumerUnit<R>>,
    data_producers: HandleTable<DataProducerUnit<R>>,
    data_consumers: HandleTable<DataConsumerUnit<R>>,
    log_handlers: HandleTable<Arc<LogTrampoline<R>>>,
    /// Handle of the handler installed in the engine. Held across every
    /// engine install so the two never disagree.
    active_log_handler: Mutex<Handle>,
}

impl<R: ManagedRuntime> BridgeContext<R> {
    /// Initializes the engine and starts the callback dispatcher.
    pub fn new(runtime: Arc<R>, engine: Arc<dyn MediaEngine>, config: BridgeConfig) -> Result<Self> {
        engine
            .initialize()
            .map_err(|e| BridgeError::initialization(format!("engine: {}", e)))?;
        let dispatcher = match Dispatcher::new(&config.dispatcher) {
            Ok(dispatcher) => Arc::new(dispatcher),
            Err(e) => {
                engine.cleanup();
                return Err(e);
            }
        };
        info!("Bridge context ready");

        Ok(Self {
            runtime,
            engine,
            dispatcher,
            config,
            devices: HandleTable::new("device"),
            transports: HandleTable::new("transport"),
            producers: HandleTable::new("producer"),
            consumers: HandleTable::new("consumer"),
            data_producers: HandleTable::new("data producer"),
            data_consumers: HandleTable::new("data consumer"),
            log_handlers: HandleTable::new("log handler"),
            active_log_handler: Mutex::new(NULL_HANDLE),
        })
    }

    pub fn runtime(&self) -> &Arc<R> {
        &self.runtime
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Releases every unit still alive and cleans up the engine.
    ///
    /// Dependents go before the objects they were created from.
    pub fn shutdown(&self) {
        {
            let mut active = self.active_log_handler();
            if *active != NULL_HANDLE {
                self.engine.set_log_handler(None);
                *active = NULL_HANDLE;
            }
        }
        self.data_consumers.clear();
        self.consumers.clear();
        self.data_producers.clear();
        self.producers.clear();
        self.transports.clear();
        self.devices.clear();
        self.log_handlers.clear();
        self.engine.cleanup();
        debug!("Bridge context shut down");
    }

    fn active_log_handler(&self) -> MutexGuard<'_, Handle> {
        match self.active_log_handler.lock() {
            Ok(active) => active,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Registers a new unit and builds the managed wrapper around its handle.
    ///
    /// The unit is disposed again if the wrapper cannot be built.
    fn expose<O, T>(
        &self,
        table: &HandleTable<OwnedUnit<O, Arc<T>>>,
        unit: OwnedUnit<O, Arc<T>>,
        constructor: ManagedMethod,
    ) -> Result<R::Object>
    where
        T: Trampoline<R>,
    {
        let trampoline = Arc::clone(unit.listener());
        let handle = table.insert(unit);

        let wrapper = self
            .runtime
            .construct(constructor, handle)
            .and_then(|wrapper| {
                trampoline.registration().register_wrapper(wrapper.clone())?;
                Ok(wrapper)
            });
        if wrapper.is_err() {
            warn!("{} {} wrapper construction failed", table.kind(), handle);
            let _ = table.dispose(handle);
        }
        wrapper
    }
}
