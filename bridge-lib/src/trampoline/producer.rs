use super::{Registration, Trampoline};
use crate::descriptor::ManagedMethod;
use crate::engine::ProducerListener;
use crate::handle::Detach;
use crate::runtime::ManagedRuntime;

pub struct ProducerTrampoline<R: ManagedRuntime> {
    registration: Registration<R>,
}

impl<R: ManagedRuntime> ProducerTrampoline<R> {
    pub fn new(registration: Registration<R>) -> Self {
        Self { registration }
    }
}

impl<R: ManagedRuntime> ProducerListener for ProducerTrampoline<R> {
    fn on_transport_close(&self) {
        self.registration
            .notify(ManagedMethod::ProducerOnTransportClose, &[]);
    }
}

impl<R: ManagedRuntime> Detach for ProducerTrampoline<R> {
    fn detach(&self) {
        self.registration.detach();
    }
}

impl<R: ManagedRuntime> Trampoline<R> for ProducerTrampoline<R> {
    fn registration(&self) -> &Registration<R> {
        &self.registration
    }
}
