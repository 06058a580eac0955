use super::{Registration, Trampoline};
use crate::descriptor::ManagedMethod;
use crate::engine::DataProducerListener;
use crate::handle::Detach;
use crate::runtime::{Arg, ManagedRuntime};

pub struct DataProducerTrampoline<R: ManagedRuntime> {
    registration: Registration<R>,
}

impl<R: ManagedRuntime> DataProducerTrampoline<R> {
    pub fn new(registration: Registration<R>) -> Self {
        Self { registration }
    }
}

impl<R: ManagedRuntime> DataProducerListener for DataProducerTrampoline<R> {
    fn on_open(&self) {
        self.registration.notify(ManagedMethod::DataProducerOnOpen, &[]);
    }

    fn on_close(&self) {
        self.registration.notify(ManagedMethod::DataProducerOnClose, &[]);
    }

    fn on_buffered_amount_change(&self, sent_data_size: u64) {
        // managed side takes a signed long
        let amount = i64::try_from(sent_data_size).unwrap_or(i64::MAX);
        self.registration.notify(
            ManagedMethod::DataProducerOnBufferedAmountChange,
            &[Arg::Long(amount)],
        );
    }

    fn on_transport_close(&self) {
        self.registration
            .notify(ManagedMethod::DataProducerOnTransportClose, &[]);
    }
}

impl<R: ManagedRuntime> Detach for DataProducerTrampoline<R> {
    fn detach(&self) {
        self.registration.detach();
    }
}

impl<R: ManagedRuntime> Trampoline<R> for DataProducerTrampoline<R> {
    fn registration(&self) -> &Registration<R> {
        &self.registration
    }
}
