use super::{BridgeContext, DataConsumerUnit};
use crate::codec;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::ManagedRuntime;
use std::sync::Arc;

impl<R: ManagedRuntime> BridgeContext<R> {
    fn data_consumer(&self, handle: Handle) -> Result<Arc<DataConsumerUnit<R>>> {
        self.data_consumers.get(handle)
    }

    pub fn data_consumer_id(&self, handle: Handle) -> Result<String> {
        Ok(self.data_consumer(handle)?.object().id()?)
    }

    pub fn data_consumer_local_id(&self, handle: Handle) -> Result<String> {
        Ok(self.data_consumer(handle)?.object().local_id()?)
    }

    pub fn data_consumer_data_producer_id(&self, handle: Handle) -> Result<String> {
        Ok(self.data_consumer(handle)?.object().data_producer_id()?)
    }

    pub fn data_consumer_sctp_stream_parameters(&self, handle: Handle) -> Result<String> {
        let parameters = self.data_consumer(handle)?.object().sctp_stream_parameters()?;
        Ok(codec::encode(&parameters))
    }

    pub fn data_consumer_ready_state(&self, handle: Handle) -> Result<i32> {
        Ok(self.data_consumer(handle)?.object().ready_state()?.code())
    }

    pub fn data_consumer_label(&self, handle: Handle) -> Result<String> {
        Ok(self.data_consumer(handle)?.object().label()?)
    }

    pub fn data_consumer_protocol(&self, handle: Handle) -> Result<String> {
        Ok(self.data_consumer(handle)?.object().protocol()?)
    }

    pub fn data_consumer_app_data(&self, handle: Handle) -> Result<String> {
        let app_data = self.data_consumer(handle)?.object().app_data()?;
        Ok(codec::encode(&app_data))
    }

    pub fn data_consumer_is_closed(&self, handle: Handle) -> Result<bool> {
        Ok(self.data_consumer(handle)?.object().is_closed()?)
    }

    pub fn data_consumer_close(&self, handle: Handle) -> Result<()> {
        Ok(self.data_consumer(handle)?.object().close()?)
    }

    pub fn dispose_data_consumer(&self, handle: Handle) -> Result<()> {
        self.data_consumers.dispose(handle)
    }
}
