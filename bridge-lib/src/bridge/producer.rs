use super::{BridgeContext, ProducerUnit};
use crate::codec;
use crate::engine::NativePtr;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::ManagedRuntime;
use std::sync::Arc;

impl<R: ManagedRuntime> BridgeContext<R> {
    fn producer(&self, handle: Handle) -> Result<Arc<ProducerUnit<R>>> {
        self.producers.get(handle)
    }

    pub fn producer_id(&self, handle: Handle) -> Result<String> {
        Ok(self.producer(handle)?.object().id()?)
    }

    pub fn producer_local_id(&self, handle: Handle) -> Result<String> {
        Ok(self.producer(handle)?.object().local_id()?)
    }

    pub fn producer_is_closed(&self, handle: Handle) -> Result<bool> {
        Ok(self.producer(handle)?.object().is_closed()?)
    }

    pub fn producer_kind(&self, handle: Handle) -> Result<String> {
        Ok(self.producer(handle)?.object().kind()?)
    }

    pub fn producer_rtp_sender(&self, handle: Handle) -> Result<NativePtr> {
        Ok(self.producer(handle)?.object().rtp_sender()?)
    }

    pub fn producer_track(&self, handle: Handle) -> Result<NativePtr> {
        Ok(self.producer(handle)?.object().track()?)
    }

    pub fn producer_rtp_parameters(&self, handle: Handle) -> Result<String> {
        let parameters = self.producer(handle)?.object().rtp_parameters()?;
        Ok(codec::encode(&parameters))
    }

    pub fn producer_is_paused(&self, handle: Handle) -> Result<bool> {
        Ok(self.producer(handle)?.object().is_paused()?)
    }

    pub fn producer_max_spatial_layer(&self, handle: Handle) -> Result<i32> {
        Ok(self.producer(handle)?.object().max_spatial_layer()?)
    }

    pub fn producer_set_max_spatial_layer(&self, handle: Handle, spatial_layer: i32) -> Result<()> {
        Ok(self
            .producer(handle)?
            .object()
            .set_max_spatial_layer(spatial_layer)?)
    }

    pub fn producer_replace_track(&self, handle: Handle, track: NativePtr) -> Result<()> {
        Ok(self.producer(handle)?.object().replace_track(track)?)
    }

    pub fn producer_app_data(&self, handle: Handle) -> Result<String> {
        let app_data = self.producer(handle)?.object().app_data()?;
        Ok(codec::encode(&app_data))
    }

    pub fn producer_stats(&self, handle: Handle) -> Result<String> {
        let stats = self.producer(handle)?.object().stats()?;
        Ok(codec::encode(&stats))
    }

    pub fn producer_pause(&self, handle: Handle) -> Result<()> {
        Ok(self.producer(handle)?.object().pause()?)
    }

    pub fn producer_resume(&self, handle: Handle) -> Result<()> {
        Ok(self.producer(handle)?.object().resume()?)
    }

    pub fn producer_close(&self, handle: Handle) -> Result<()> {
        Ok(self.producer(handle)?.object().close()?)
    }

    pub fn dispose_producer(&self, handle: Handle) -> Result<()> {
        self.producers.dispose(handle)
    }
}
