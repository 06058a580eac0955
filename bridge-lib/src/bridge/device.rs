use super::{BridgeContext, TransportObject};
use crate::codec;
use crate::descriptor::ManagedMethod;
use crate::engine::{Device, NativePtr, PeerConnectionOptions, TransportOptions};
use crate::error::{BridgeError, Result};
use crate::handle::{Handle, OwnedUnit};
use crate::runtime::ManagedRuntime;
use crate::trampoline::{Registration, TransportTrampoline};
use std::sync::Arc;

/// Arguments of transport creation, as received from managed code.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportParams<'a> {
    pub id: Option<&'a str>,
    pub ice_parameters: Option<&'a str>,
    pub ice_candidates: Option<&'a str>,
    pub dtls_parameters: Option<&'a str>,
    pub sctp_parameters: Option<&'a str>,
    pub rtc_configuration: Option<&'a str>,
    pub peer_connection_factory: NativePtr,
    pub app_data: Option<&'a str>,
}

impl TransportParams<'_> {
    fn decode(&self) -> Result<TransportOptions> {
        Ok(TransportOptions {
            id: self.id.ok_or(BridgeError::NullArgument("id"))?.to_string(),
            ice_parameters: codec::decode_required("iceParameters", self.ice_parameters)?,
            ice_candidates: codec::decode_required("iceCandidates", self.ice_candidates)?,
            dtls_parameters: codec::decode_required("dtlsParameters", self.dtls_parameters)?,
            sctp_parameters: codec::decode_or_null(self.sctp_parameters)?,
            peer_connection: PeerConnectionOptions {
                configuration: codec::decode(self.rtc_configuration)?,
                factory: self.peer_connection_factory,
            },
            app_data: codec::decode_or_object(self.app_data)?,
        })
    }
}

impl<R: ManagedRuntime> BridgeContext<R> {
    fn device(&self, handle: Handle) -> Result<Arc<Box<dyn Device>>> {
        self.devices.get(handle)
    }

    pub fn create_device(&self) -> Result<Handle> {
        let device = self.engine.new_device()?;
        Ok(self.devices.insert(device))
    }

    pub fn dispose_device(&self, handle: Handle) -> Result<()> {
        self.devices.remove(handle).map(|_| ())
    }

    pub fn device_is_loaded(&self, handle: Handle) -> Result<bool> {
        Ok(self.device(handle)?.is_loaded()?)
    }

    pub fn device_rtp_capabilities(&self, handle: Handle) -> Result<String> {
        let capabilities = self.device(handle)?.rtp_capabilities()?;
        Ok(codec::encode(&capabilities))
    }

    pub fn device_sctp_capabilities(&self, handle: Handle) -> Result<String> {
        let capabilities = self.device(handle)?.sctp_capabilities()?;
        Ok(codec::encode(&capabilities))
    }

    pub fn device_load(
        &self,
        handle: Handle,
        router_rtp_capabilities: Option<&str>,
        rtc_configuration: Option<&str>,
        peer_connection_factory: NativePtr,
    ) -> Result<()> {
        let device = self.device(handle)?;
        let capabilities =
            codec::decode_required("routerRtpCapabilities", router_rtp_capabilities)?;
        let options = PeerConnectionOptions {
            configuration: codec::decode(rtc_configuration)?,
            factory: peer_connection_factory,
        };
        Ok(device.load(&capabilities, &options)?)
    }

    pub fn device_can_produce(&self, handle: Handle, kind: &str) -> Result<bool> {
        Ok(self.device(handle)?.can_produce(kind)?)
    }

    pub fn create_send_transport(
        &self,
        handle: Handle,
        listener: R::Object,
        params: TransportParams<'_>,
    ) -> Result<R::Object> {
        let device = self.device(handle)?;
        let options = params.decode()?;

        let trampoline = Arc::new(TransportTrampoline::new(
            Registration::new("send transport", Arc::clone(&self.runtime), listener),
            Arc::clone(&self.dispatcher),
        ));
        let transport = device.create_send_transport(trampoline.clone(), options)?;
        self.expose(
            &self.transports,
            OwnedUnit::new(TransportObject::Send(transport), trampoline),
            ManagedMethod::SendTransportInit,
        )
    }

    pub fn create_recv_transport(
        &self,
        handle: Handle,
        listener: R::Object,
        params: TransportParams<'_>,
    ) -> Result<R::Object> {
        let device = self.device(handle)?;
        let options = params.decode()?;

        let trampoline = Arc::new(TransportTrampoline::new(
            Registration::new("recv transport", Arc::clone(&self.runtime), listener),
            Arc::clone(&self.dispatcher),
        ));
        let transport = device.create_recv_transport(trampoline.clone(), options)?;
        self.expose(
            &self.transports,
            OwnedUnit::new(TransportObject::Recv(transport), trampoline),
            ManagedMethod::RecvTransportInit,
        )
    }
}
