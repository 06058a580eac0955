use super::{BridgeContext, DataProducerUnit};
use crate::codec;
use crate::engine::DataBuffer;
use crate::error::Result;
use crate::handle::Handle;
use crate::runtime::ManagedRuntime;
use std::sync::Arc;

impl<R: ManagedRuntime> BridgeContext<R> {
    fn data_producer(&self, handle: Handle) -> Result<Arc<DataProducerUnit<R>>> {
        self.data_producers.get(handle)
    }

    pub fn data_producer_id(&self, handle: Handle) -> Result<String> {
        Ok(self.data_producer(handle)?.object().id()?)
    }

    pub fn data_producer_local_id(&self, handle: Handle) -> Result<String> {
        Ok(self.data_producer(handle)?.object().local_id()?)
    }

    pub fn data_producer_sctp_stream_parameters(&self, handle: Handle) -> Result<String> {
        let parameters = self.data_producer(handle)?.object().sctp_stream_parameters()?;
        Ok(codec::encode(&parameters))
    }

    pub fn data_producer_ready_state(&self, handle: Handle) -> Result<i32> {
        Ok(self.data_producer(handle)?.object().ready_state()?.code())
    }

    pub fn data_producer_label(&self, handle: Handle) -> Result<String> {
        Ok(self.data_producer(handle)?.object().label()?)
    }

    pub fn data_producer_protocol(&self, handle: Handle) -> Result<String> {
        Ok(self.data_producer(handle)?.object().protocol()?)
    }

    pub fn data_producer_buffered_amount(&self, handle: Handle) -> Result<i64> {
        let amount = self.data_producer(handle)?.object().buffered_amount()?;
        Ok(i64::try_from(amount).unwrap_or(i64::MAX))
    }

    pub fn data_producer_app_data(&self, handle: Handle) -> Result<String> {
        let app_data = self.data_producer(handle)?.object().app_data()?;
        Ok(codec::encode(&app_data))
    }

    pub fn data_producer_is_closed(&self, handle: Handle) -> Result<bool> {
        Ok(self.data_producer(handle)?.object().is_closed()?)
    }

    pub fn data_producer_close(&self, handle: Handle) -> Result<()> {
        Ok(self.data_producer(handle)?.object().close()?)
    }

    pub fn data_producer_send(&self, handle: Handle, data: &[u8], binary: bool) -> Result<()> {
        let unit = self.data_producer(handle)?;
        Ok(unit.object().send(DataBuffer { data, binary })?)
    }

    pub fn dispose_data_producer(&self, handle: Handle) -> Result<()> {
        self.data_producers.dispose(handle)
    }
}
