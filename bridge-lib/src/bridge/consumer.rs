use super::{BridgeContext, ConsumerUnit};
use crate::codec;
use crate::engine::NativePtr;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::ManagedRuntime;
use std::sync::Arc;

impl<R: ManagedRuntime> BridgeContext<R> {
    fn consumer(&self, handle: Handle) -> Result<Arc<ConsumerUnit<R>>> {
        self.consumers.get(handle)
    }

    pub fn consumer_id(&self, handle: Handle) -> Result<String> {
        Ok(self.consumer(handle)?.object().id()?)
    }

    pub fn consumer_local_id(&self, handle: Handle) -> Result<String> {
        Ok(self.consumer(handle)?.object().local_id()?)
    }

    pub fn consumer_producer_id(&self, handle: Handle) -> Result<String> {
        Ok(self.consumer(handle)?.object().producer_id()?)
    }

    pub fn consumer_is_closed(&self, handle: Handle) -> Result<bool> {
        Ok(self.consumer(handle)?.object().is_closed()?)
    }

    pub fn consumer_kind(&self, handle: Handle) -> Result<String> {
        Ok(self.consumer(handle)?.object().kind()?)
    }

    pub fn consumer_rtp_receiver(&self, handle: Handle) -> Result<NativePtr> {
        Ok(self.consumer(handle)?.object().rtp_receiver()?)
    }

    pub fn consumer_track(&self, handle: Handle) -> Result<NativePtr> {
        Ok(self.consumer(handle)?.object().track()?)
    }

    pub fn consumer_rtp_parameters(&self, handle: Handle) -> Result<String> {
        let parameters = self.consumer(handle)?.object().rtp_parameters()?;
        Ok(codec::encode(&parameters))
    }

    pub fn consumer_is_paused(&self, handle: Handle) -> Result<bool> {
        Ok(self.consumer(handle)?.object().is_paused()?)
    }

    pub fn consumer_app_data(&self, handle: Handle) -> Result<String> {
        let app_data = self.consumer(handle)?.object().app_data()?;
        Ok(codec::encode(&app_data))
    }

    pub fn consumer_stats(&self, handle: Handle) -> Result<String> {
        let stats = self.consumer(handle)?.object().stats()?;
        Ok(codec::encode(&stats))
    }

    pub fn consumer_pause(&self, handle: Handle) -> Result<()> {
        Ok(self.consumer(handle)?.object().pause()?)
    }

    pub fn consumer_resume(&self, handle: Handle) -> Result<()> {
        Ok(self.consumer(handle)?.object().resume()?)
    }

    pub fn consumer_close(&self, handle: Handle) -> Result<()> {
        Ok(self.consumer(handle)?.object().close()?)
    }

    pub fn dispose_consumer(&self, handle: Handle) -> Result<()> {
        self.consumers.dispose(handle)
    }
}
