use super::BridgeContext;
use crate::engine::{LogHandler, LogLevel};
use crate::error::Result;
use crate::handle::{Detach, Handle, NULL_HANDLE};
use crate::runtime::ManagedRuntime;
use crate::trampoline::LogTrampoline;
use log::debug;
use std::sync::Arc;

impl<R: ManagedRuntime> BridgeContext<R> {
    /// Installs `handler` as the engine's log sink, replacing any previous one.
    pub fn set_log_handler(&self, handler: R::Object) -> Result<Handle> {
        let trampoline = Arc::new(LogTrampoline::new(
            Arc::clone(&self.runtime),
            handler,
            self.config.log.tag.clone(),
        ));
        let handle = self.log_handlers.insert(Arc::clone(&trampoline));
        let sink: Arc<dyn LogHandler> = trampoline;

        let mut active = self.active_log_handler();
        self.engine.set_log_handler(Some(sink));
        *active = handle;
        Ok(handle)
    }

    pub fn set_log_level(&self, level: i32) -> Result<()> {
        let level = LogLevel::from_code(level)?;
        self.engine.set_log_level(level);
        Ok(())
    }

    /// Releases a handler. The active one is uninstalled from the engine first.
    pub fn dispose_log_handler(&self, handle: Handle) -> Result<()> {
        let trampoline = self.log_handlers.remove(handle)?;
        {
            let mut active = self.active_log_handler();
            if *active == handle {
                self.engine.set_log_handler(None);
                *active = NULL_HANDLE;
                debug!("Active log handler {} uninstalled", handle);
            }
        }
        trampoline.detach();
        Ok(())
    }
}
