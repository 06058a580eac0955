use crate::descriptor::ManagedMethod;
use crate::engine::{LogHandler, LogLevel};
use crate::handle::Detach;
use crate::runtime::{Arg, ManagedRuntime};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Forwards engine log lines to a managed `LogHandlerInterface`.
pub struct LogTrampoline<R: ManagedRuntime> {
    runtime: Arc<R>,
    handler: R::Object,
    tag: String,
    detached: AtomicBool,
}

impl<R: ManagedRuntime> LogTrampoline<R> {
    pub fn new(runtime: Arc<R>, handler: R::Object, tag: String) -> Self {
        Self {
            runtime,
            handler,
            tag,
            detached: AtomicBool::new(false),
        }
    }
}

impl<R: ManagedRuntime> LogHandler for LogTrampoline<R> {
    fn on_log(&self, level: LogLevel, message: &str) {
        if self.detached.load(Ordering::Acquire) {
            return;
        }
        // not logged: log output may feed back into this handler
        let _ = self.runtime.call(
            &self.handler,
            ManagedMethod::LogHandlerOnLog,
            &[
                Arg::Int(level.code()),
                Arg::Str(&self.tag),
                Arg::Str(message),
            ],
        );
    }
}

impl<R: ManagedRuntime> Detach for LogTrampoline<R> {
    fn detach(&self) {
        self.detached.store(true, Ordering::Release);
    }
}
