//! Listener trampolines
//!
//! Engine listener implementations that forward events into managed listener
//! objects. Fire-and-forget events call straight through on the engine thread.
//! Events that need a reply are handed to the [`Dispatcher`] and the engine
//! gets a [`PendingReply`](crate::dispatcher::PendingReply) to block on.
//!
//! [`Dispatcher`]: crate::dispatcher::Dispatcher

mod consumer;
mod data_consumer;
mod data_producer;
mod logger;
mod producer;
mod transport;

pub use consumer::ConsumerTrampoline;
pub use data_consumer::DataConsumerTrampoline;
pub use data_producer::DataProducerTrampoline;
pub use logger::LogTrampoline;
pub use producer::ProducerTrampoline;
pub use transport::TransportTrampoline;

use crate::descriptor::ManagedMethod;
use crate::error::{BridgeError, Result};
use crate::handle::Detach;
use crate::runtime::{Arg, ManagedRuntime, ManagedValue};
use log::{debug, error, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Managed listener plus the wrapper object passed back as the event source.
pub struct Registration<R: ManagedRuntime> {
    kind: &'static str,
    runtime: Arc<R>,
    listener: R::Object,
    wrapper: OnceLock<R::Object>,
    detached: AtomicBool,
}

impl<R: ManagedRuntime> Registration<R> {
    pub fn new(kind: &'static str, runtime: Arc<R>, listener: R::Object) -> Self {
        Self {
            kind,
            runtime,
            listener,
            wrapper: OnceLock::new(),
            detached: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Sets the wrapper. Happens once, right after the wrapper is constructed.
    pub fn register_wrapper(&self, wrapper: R::Object) -> Result<()> {
        self.wrapper
            .set(wrapper)
            .map_err(|_| BridgeError::managed(format!("{} wrapper registered twice", self.kind)))
    }

    pub fn wrapper(&self) -> Option<&R::Object> {
        self.wrapper.get()
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }

    /// Calls `method` on the listener with the wrapper as first argument.
    pub fn invoke(&self, method: ManagedMethod, args: &[Arg<'_, R::Object>]) -> Result<ManagedValue> {
        if self.is_detached() {
            return Err(BridgeError::managed(format!(
                "{} listener detached",
                self.kind
            )));
        }
        let wrapper = self.wrapper.get().ok_or_else(|| {
            BridgeError::managed(format!("{} event before wrapper registration", self.kind))
        })?;

        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(Arg::Object(wrapper));
        full.extend_from_slice(args);
        self.runtime.call(&self.listener, method, &full)
    }

    /// Delivers a fire-and-forget event. Failures are logged, never returned.
    pub fn notify(&self, method: ManagedMethod, args: &[Arg<'_, R::Object>]) {
        if self.is_detached() {
            debug!("{} event {:?} dropped after dispose", self.kind, method);
            return;
        }
        if self.wrapper.get().is_none() {
            error!(
                "{} event {:?} arrived before wrapper registration",
                self.kind, method
            );
            return;
        }
        if let Err(e) = self.invoke(method, args) {
            warn!("{} event {:?} failed: {}", self.kind, method, e);
        }
    }
}

impl<R: ManagedRuntime> Detach for Registration<R> {
    fn detach(&self) {
        self.detached.store(true, Ordering::Release);
    }
}

/// Trampoline owning a [`Registration`].
pub trait Trampoline<R: ManagedRuntime>: Detach + Send + Sync {
    fn registration(&self) -> &Registration<R>;
}
