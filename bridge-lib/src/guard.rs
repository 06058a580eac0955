//! Fault guard for boundary calls
//!
//! Runs an operation, catching both returned errors and panics, and turns
//! whatever went wrong into exactly one raised managed exception.

use crate::error::{BridgeError, Result};
use log::{error, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Message used when a panic payload carries no text.
pub const UNIDENTIFIED_FAULT: &str = "Unidentified native fault";

/// Destination for errors raised on the calling managed thread.
pub trait ExceptionSink {
    fn raise(&mut self, error: &BridgeError);
}

/// Value-returning guard. `None` means an exception has been raised.
pub fn guard<S, T, F>(sink: &mut S, op: F) -> Option<T>
where
    S: ExceptionSink + ?Sized,
    F: FnOnce(&mut S) -> Result<T>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| op(&mut *sink)));
    let error = match outcome {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(error)) => error,
        Err(payload) => BridgeError::native(describe_panic(payload.as_ref())),
    };

    warn!("{}", error);
    sink.raise(&error);
    None
}

/// Guard for operations with no result.
pub fn guard_void<S, F>(sink: &mut S, op: F)
where
    S: ExceptionSink + ?Sized,
    F: FnOnce(&mut S) -> Result<()>,
{
    let _ = guard(sink, op);
}

/// Runs a release path that must never raise. Failures are only logged.
pub fn shield<F>(what: &str, op: F)
where
    F: FnOnce() -> Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("{} failed: {}", what, e),
        Err(payload) => error!("{} panicked: {}", what, describe_panic(payload.as_ref())),
    }
}

pub fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        UNIDENTIFIED_FAULT.to_string()
    }
}
