use super::{BridgeContext, TransportObject, TransportUnit};
use crate::codec;
use crate::descriptor::ManagedMethod;
use crate::engine::{
    ConsumeDataOptions, ConsumeOptions, NativePtr, NativeResult, ProduceDataOptions,
    ProduceOptions, RecvTransport, SendTransport,
};
use crate::error::{BridgeError, Result};
use crate::handle::{Handle, OwnedUnit};
use crate::runtime::ManagedRuntime;
use crate::trampoline::{
    ConsumerTrampoline, DataConsumerTrampoline, DataProducerTrampoline, ProducerTrampoline,
    Registration,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProduceParams<'a> {
    pub track: NativePtr,
    /// JSON array of `RtpEncodingParameters`.
    pub encodings: Option<&'a str>,
    pub codec_options: Option<&'a str>,
    pub codec: Option<&'a str>,
    pub app_data: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProduceDataParams<'a> {
    pub label: Option<&'a str>,
    pub protocol: Option<&'a str>,
    pub ordered: bool,
    pub max_retransmits: i32,
    pub max_packet_life_time: i32,
    pub app_data: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsumeParams<'a> {
    pub id: Option<&'a str>,
    pub producer_id: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub rtp_parameters: Option<&'a str>,
    pub app_data: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsumeDataParams<'a> {
    pub id: Option<&'a str>,
    pub data_producer_id: Option<&'a str>,
    pub stream_id: i32,
    pub label: Option<&'a str>,
    pub protocol: Option<&'a str>,
    pub app_data: Option<&'a str>,
}

fn required(name: &'static str, value: Option<&str>) -> Result<String> {
    value
        .map(str::to_string)
        .ok_or(BridgeError::NullArgument(name))
}

impl<R: ManagedRuntime> BridgeContext<R> {
    fn transport(&self, handle: Handle) -> Result<Arc<TransportUnit<R>>> {
        self.transports.get(handle)
    }

    pub fn transport_id(&self, handle: Handle) -> Result<String> {
        Ok(self.transport(handle)?.object().transport().id()?)
    }

    pub fn transport_is_closed(&self, handle: Handle) -> Result<bool> {
        Ok(self.transport(handle)?.object().transport().is_closed()?)
    }

    pub fn transport_connection_state(&self, handle: Handle) -> Result<String> {
        Ok(self.transport(handle)?.object().transport().connection_state()?)
    }

    pub fn transport_app_data(&self, handle: Handle) -> Result<String> {
        let app_data = self.transport(handle)?.object().transport().app_data()?;
        Ok(codec::encode(&app_data))
    }

    pub fn transport_close(&self, handle: Handle) -> Result<()> {
        Ok(self.transport(handle)?.object().transport().close()?)
    }

    pub fn transport_stats(&self, handle: Handle) -> Result<String> {
        let stats = self.transport(handle)?.object().transport().stats()?;
        Ok(codec::encode(&stats))
    }

    pub fn transport_restart_ice(&self, handle: Handle, ice_parameters: Option<&str>) -> Result<()> {
        let unit = self.transport(handle)?;
        let ice_parameters = codec::decode_or_object(ice_parameters)?;
        Ok(unit.object().transport().restart_ice(&ice_parameters)?)
    }

    pub fn transport_update_ice_servers(
        &self,
        handle: Handle,
        ice_servers: Option<&str>,
    ) -> Result<()> {
        let unit = self.transport(handle)?;
        let ice_servers = codec::decode_or_object(ice_servers)?;
        Ok(unit.object().transport().update_ice_servers(&ice_servers)?)
    }

    pub fn dispose_transport(&self, handle: Handle) -> Result<()> {
        self.transports.dispose(handle)
    }

    fn send_transport(&self, handle: Handle) -> Result<Arc<TransportUnit<R>>> {
        let unit = self.transport(handle)?;
        match unit.object() {
            TransportObject::Send(_) => Ok(unit),
            TransportObject::Recv(_) => Err(BridgeError::invalid_handle("send transport", handle)),
        }
    }

    fn recv_transport(&self, handle: Handle) -> Result<Arc<TransportUnit<R>>> {
        let unit = self.transport(handle)?;
        match unit.object() {
            TransportObject::Recv(_) => Ok(unit),
            TransportObject::Send(_) => Err(BridgeError::invalid_handle("recv transport", handle)),
        }
    }

    pub fn produce(
        &self,
        handle: Handle,
        listener: R::Object,
        params: ProduceParams<'_>,
    ) -> Result<R::Object> {
        let unit = self.send_transport(handle)?;
        let options = ProduceOptions {
            track: params.track,
            encodings: codec::decode_or_array(params.encodings)?,
            codec_options: codec::decode_or_object(params.codec_options)?,
            codec: codec::decode(params.codec)?,
            app_data: codec::decode_or_object(params.app_data)?,
        };

        let trampoline = Arc::new(ProducerTrampoline::new(Registration::new(
            "producer",
            Arc::clone(&self.runtime),
            listener,
        )));
        let producer = with_send(&unit, |transport| {
            transport.produce(trampoline.clone(), options)
        })?;
        self.expose(
            &self.producers,
            OwnedUnit::new(producer, trampoline),
            ManagedMethod::ProducerInit,
        )
    }

    pub fn produce_data(
        &self,
        handle: Handle,
        listener: R::Object,
        params: ProduceDataParams<'_>,
    ) -> Result<R::Object> {
        let unit = self.send_transport(handle)?;
        let options = ProduceDataOptions {
            label: params.label.unwrap_or_default().to_string(),
            protocol: params.protocol.unwrap_or_default().to_string(),
            ordered: params.ordered,
            max_retransmits: params.max_retransmits,
            max_packet_life_time: params.max_packet_life_time,
            app_data: codec::decode_or_object(params.app_data)?,
        };

        let trampoline = Arc::new(DataProducerTrampoline::new(Registration::new(
            "data producer",
            Arc::clone(&self.runtime),
            listener,
        )));
        let data_producer = with_send(&unit, |transport| {
            transport.produce_data(trampoline.clone(), options)
        })?;
        self.expose(
            &self.data_producers,
            OwnedUnit::new(data_producer, trampoline),
            ManagedMethod::DataProducerInit,
        )
    }

    pub fn consume(
        &self,
        handle: Handle,
        listener: R::Object,
        params: ConsumeParams<'_>,
    ) -> Result<R::Object> {
        let unit = self.recv_transport(handle)?;
        let options = ConsumeOptions {
            id: required("id", params.id)?,
            producer_id: required("producerId", params.producer_id)?,
            kind: required("kind", params.kind)?,
            rtp_parameters: codec::decode_or_object(params.rtp_parameters)?,
            app_data: codec::decode_or_object(params.app_data)?,
        };

        let trampoline = Arc::new(ConsumerTrampoline::new(Registration::new(
            "consumer",
            Arc::clone(&self.runtime),
            listener,
        )));
        let consumer = with_recv(&unit, |transport| {
            transport.consume(trampoline.clone(), options)
        })?;
        self.expose(
            &self.consumers,
            OwnedUnit::new(consumer, trampoline),
            ManagedMethod::ConsumerInit,
        )
    }

    pub fn consume_data(
        &self,
        handle: Handle,
        listener: R::Object,
        params: ConsumeDataParams<'_>,
    ) -> Result<R::Object> {
        let unit = self.recv_transport(handle)?;
        let options = ConsumeDataOptions {
            id: required("id", params.id)?,
            data_producer_id: required("dataProducerId", params.data_producer_id)?,
            stream_id: params.stream_id,
            label: params.label.unwrap_or_default().to_string(),
            protocol: params.protocol.unwrap_or_default().to_string(),
            app_data: codec::decode_or_object(params.app_data)?,
        };

        let trampoline = Arc::new(DataConsumerTrampoline::new(Registration::new(
            "data consumer",
            Arc::clone(&self.runtime),
            listener,
        )));
        let data_consumer = with_recv(&unit, |transport| {
            transport.consume_data(trampoline.clone(), options)
        })?;
        self.expose(
            &self.data_consumers,
            OwnedUnit::new(data_consumer, trampoline),
            ManagedMethod::DataConsumerInit,
        )
    }
}

fn with_send<R, T, F>(unit: &TransportUnit<R>, op: F) -> Result<T>
where
    R: ManagedRuntime,
    F: FnOnce(&dyn SendTransport) -> NativeResult<T>,
{
    match unit.object() {
        TransportObject::Send(transport) => Ok(op(transport.as_ref())?),
        TransportObject::Recv(_) => Err(BridgeError::native("not a send transport")),
    }
}

fn with_recv<R, T, F>(unit: &TransportUnit<R>, op: F) -> Result<T>
where
    R: ManagedRuntime,
    F: FnOnce(&dyn RecvTransport) -> NativeResult<T>,
{
    match unit.object() {
        TransportObject::Recv(transport) => Ok(op(transport.as_ref())?),
        TransportObject::Send(_) => Err(BridgeError::native("not a recv transport")),
    }
}
