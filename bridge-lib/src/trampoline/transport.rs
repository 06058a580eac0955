use super::{Registration, Trampoline};
use crate::codec::{self, Document};
use crate::descriptor::ManagedMethod;
use crate::dispatcher::{Dispatcher, PendingReply};
use crate::engine::{RecvTransportListener, SendTransportListener, TransportListener};
use crate::error::Result;
use crate::handle::Detach;
use crate::runtime::{Arg, ManagedRuntime};
use log::{trace, warn};
use std::sync::Arc;

/// Listener for both send and receive transports.
pub struct TransportTrampoline<R: ManagedRuntime> {
    registration: Arc<Registration<R>>,
    dispatcher: Arc<Dispatcher>,
}

impl<R: ManagedRuntime> TransportTrampoline<R> {
    pub fn new(registration: Registration<R>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            registration: Arc::new(registration),
            dispatcher,
        }
    }

    /// Runs a reply-bearing callback on the dispatcher.
    fn request<T, F>(&self, method: ManagedMethod, call: F) -> PendingReply<T>
    where
        T: Send + 'static,
        F: FnOnce(&Registration<R>) -> Result<T> + Send + 'static,
    {
        trace!("{} request {:?}", self.registration.kind(), method);
        let registration = Arc::clone(&self.registration);
        self.dispatcher.submit(move || {
            call(registration.as_ref()).map_err(|e| {
                warn!("{} request {:?} failed: {}", registration.kind(), method, e);
                e
            })
        })
    }
}

impl<R: ManagedRuntime> TransportListener for TransportTrampoline<R> {
    fn on_connect(&self, dtls_parameters: &Document) -> PendingReply<()> {
        let dtls_parameters = codec::encode(dtls_parameters);
        self.request(ManagedMethod::TransportOnConnect, move |registration| {
            registration
                .invoke(
                    ManagedMethod::TransportOnConnect,
                    &[Arg::Str(&dtls_parameters)],
                )
                .map(|_| ())
        })
    }

    fn on_connection_state_change(&self, connection_state: &str) {
        self.registration.notify(
            ManagedMethod::TransportOnConnectionStateChange,
            &[Arg::Str(connection_state)],
        );
    }
}

impl<R: ManagedRuntime> SendTransportListener for TransportTrampoline<R> {
    fn on_produce(
        &self,
        kind: &str,
        rtp_parameters: &Document,
        app_data: &Document,
    ) -> PendingReply<String> {
        let kind = kind.to_string();
        let rtp_parameters = codec::encode(rtp_parameters);
        let app_data = codec::encode(app_data);
        self.request(ManagedMethod::SendTransportOnProduce, move |registration| {
            registration
                .invoke(
                    ManagedMethod::SendTransportOnProduce,
                    &[
                        Arg::Str(&kind),
                        Arg::Str(&rtp_parameters),
                        Arg::Str(&app_data),
                    ],
                )?
                .into_string()
        })
    }

    fn on_produce_data(
        &self,
        sctp_stream_parameters: &Document,
        label: &str,
        protocol: &str,
        app_data: &Document,
    ) -> PendingReply<String> {
        let sctp_stream_parameters = codec::encode(sctp_stream_parameters);
        let label = label.to_string();
        let protocol = protocol.to_string();
        let app_data = codec::encode(app_data);
        self.request(ManagedMethod::SendTransportOnProduceData, move |registration| {
            registration
                .invoke(
                    ManagedMethod::SendTransportOnProduceData,
                    &[
                        Arg::Str(&sctp_stream_parameters),
                        Arg::Str(&label),
                        Arg::Str(&protocol),
                        Arg::Str(&app_data),
                    ],
                )?
                .into_string()
        })
    }
}

impl<R: ManagedRuntime> RecvTransportListener for TransportTrampoline<R> {}

impl<R: ManagedRuntime> Detach for TransportTrampoline<R> {
    fn detach(&self) {
        self.registration.detach();
    }
}

impl<R: ManagedRuntime> Trampoline<R> for TransportTrampoline<R> {
    fn registration(&self) -> &Registration<R> {
        &self.registration
    }
}
