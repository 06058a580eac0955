//! Installed bridge context.
//!
//! A slot holds at most one context between library load and unload. Entry
//! points clone the `Arc` out of the slot, so an unload racing a call only
//! drops the context once that call returns.

use crate::bridge::BridgeContext;
use crate::config::BridgeConfig;
use crate::engine::MediaEngine;
use crate::error::{BridgeError, Result};
use crate::guard::{guard, ExceptionSink};
use crate::runtime::ManagedRuntime;
use log::{error, info, warn};
use std::sync::{Arc, RwLock};

pub struct BridgeSlot<R: ManagedRuntime> {
    context: RwLock<Option<Arc<BridgeContext<R>>>>,
}

impl<R: ManagedRuntime> BridgeSlot<R> {
    pub const fn new() -> Self {
        Self {
            context: RwLock::new(None),
        }
    }

    /// Installs a context. Any context left from a previous load is shut down.
    pub fn install(&self, context: BridgeContext<R>) {
        let previous = match self.context.write() {
            Ok(mut slot) => slot.replace(Arc::new(context)),
            Err(poisoned) => poisoned.into_inner().replace(Arc::new(context)),
        };
        if let Some(previous) = previous {
            warn!("Replacing a bridge context that was never unloaded");
            previous.shutdown();
        }
        info!("Bridge context installed");
    }

    pub fn current(&self) -> Result<Arc<BridgeContext<R>>> {
        let slot = match self.context.read() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.as_ref().cloned().ok_or(BridgeError::NotInitialized)
    }

    /// Runs an entry point against the installed context, inside the fault
    /// guard. `None` means an exception was raised on `sink`.
    pub fn enter<S, T, F>(&self, sink: &mut S, op: F) -> Option<T>
    where
        S: ExceptionSink + ?Sized,
        F: FnOnce(&mut S, &BridgeContext<R>) -> Result<T>,
    {
        guard(sink, |sink| {
            let context = self.current()?;
            op(sink, &context)
        })
    }

    pub fn is_installed(&self) -> bool {
        self.current().is_ok()
    }

    /// Removes and shuts down the installed context, if any.
    pub fn uninstall(&self) -> bool {
        let context = match self.context.write() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match context {
            Some(context) => {
                context.shutdown();
                info!("Bridge context uninstalled");
                true
            }
            None => false,
        }
    }
}

impl<R: ManagedRuntime> Default for BridgeSlot<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the runtime and a context around it, then installs the context.
///
/// Nothing is installed unless every step succeeds.
pub fn load<R, F>(
    slot: &BridgeSlot<R>,
    runtime: F,
    engine: Arc<dyn MediaEngine>,
    config: BridgeConfig,
) -> Result<()>
where
    R: ManagedRuntime,
    F: FnOnce() -> Result<R>,
{
    let result = runtime()
        .and_then(|runtime| BridgeContext::new(Arc::new(runtime), engine, config));
    match result {
        Ok(context) => {
            slot.install(context);
            Ok(())
        }
        Err(e) => {
            error!("Bridge load failed: {}", e);
            Err(e)
        }
    }
}

pub fn unload<R: ManagedRuntime>(slot: &BridgeSlot<R>) {
    if !slot.uninstall() {
        warn!("Unload without an installed bridge context");
    }
}
