use super::{Registration, Trampoline};
use crate::descriptor::ManagedMethod;
use crate::engine::{DataBuffer, DataConsumerListener};
use crate::handle::Detach;
use crate::runtime::{Arg, ManagedRuntime};

pub struct DataConsumerTrampoline<R: ManagedRuntime> {
    registration: Registration<R>,
}

impl<R: ManagedRuntime> DataConsumerTrampoline<R> {
    pub fn new(registration: Registration<R>) -> Self {
        Self { registration }
    }
}

impl<R: ManagedRuntime> DataConsumerListener for DataConsumerTrampoline<R> {
    fn on_connecting(&self) {
        self.registration
            .notify(ManagedMethod::DataConsumerOnConnecting, &[]);
    }

    fn on_open(&self) {
        self.registration.notify(ManagedMethod::DataConsumerOnOpen, &[]);
    }

    fn on_closing(&self) {
        self.registration
            .notify(ManagedMethod::DataConsumerOnClosing, &[]);
    }

    fn on_close(&self) {
        self.registration.notify(ManagedMethod::DataConsumerOnClose, &[]);
    }

    /// The managed buffer views the engine's memory for the duration of the
    /// call only.
    fn on_message(&self, buffer: &DataBuffer<'_>) {
        self.registration
            .notify(ManagedMethod::DataConsumerOnMessage, &[Arg::Buffer(*buffer)]);
    }

    fn on_transport_close(&self) {
        self.registration
            .notify(ManagedMethod::DataConsumerOnTransportClose, &[]);
    }
}

impl<R: ManagedRuntime> Detach for DataConsumerTrampoline<R> {
    fn detach(&self) {
        self.registration.detach();
    }
}

impl<R: ManagedRuntime> Trampoline<R> for DataConsumerTrampoline<R> {
    fn registration(&self) -> &Registration<R> {
        &self.registration
    }
}
