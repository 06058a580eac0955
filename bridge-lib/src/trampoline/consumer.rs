use super::{Registration, Trampoline};
use crate::descriptor::ManagedMethod;
use crate::engine::ConsumerListener;
use crate::handle::Detach;
use crate::runtime::ManagedRuntime;

pub struct ConsumerTrampoline<R: ManagedRuntime> {
    registration: Registration<R>,
}

impl<R: ManagedRuntime> ConsumerTrampoline<R> {
    pub fn new(registration: Registration<R>) -> Self {
        Self { registration }
    }
}

impl<R: ManagedRuntime> ConsumerListener for ConsumerTrampoline<R> {
    fn on_transport_close(&self) {
        self.registration
            .notify(ManagedMethod::ConsumerOnTransportClose, &[]);
    }
}

impl<R: ManagedRuntime> Detach for ConsumerTrampoline<R> {
    fn detach(&self) {
        self.registration.detach();
    }
}

impl<R: ManagedRuntime> Trampoline<R> for ConsumerTrampoline<R> {
    fn registration(&self) -> &Registration<R> {
        &self.registration
    }
}
