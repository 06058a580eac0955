//! Calls from native threads into the managed runtime.

use crate::descriptor::ManagedMethod;
use crate::engine::DataBuffer;
use crate::error::{BridgeError, Result};
use crate::handle::Handle;

/// One argument of a managed method call.
#[derive(Debug)]
pub enum Arg<'a, O> {
    Object(&'a O),
    Str(&'a str),
    Int(i32),
    Long(i64),
    /// Wrapped as a `DataChannel.Buffer` over the same memory.
    Buffer(DataBuffer<'a>),
}

impl<O> Clone for Arg<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for Arg<'_, O> {}

/// Result of a managed method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedValue {
    Void,
    Str(Option<String>),
}

impl ManagedValue {
    /// A reply callback must hand back a non-null string.
    pub fn into_string(self) -> Result<String> {
        match self {
            Self::Str(Some(value)) => Ok(value),
            Self::Str(None) => Err(BridgeError::managed("callback returned null")),
            Self::Void => Err(BridgeError::managed("callback returned no value")),
        }
    }
}

/// Host runtime that owns the managed objects the bridge talks to.
///
/// Implementations attach the calling thread when needed. Attaching is
/// idempotent and lasts for the thread's lifetime.
pub trait ManagedRuntime: Send + Sync + 'static {
    /// Durable reference to a managed object. Clones share the referent.
    type Object: Clone + Send + Sync + 'static;

    /// Builds a managed wrapper around `handle` with a `(J)V` constructor.
    fn construct(&self, constructor: ManagedMethod, handle: Handle) -> Result<Self::Object>;

    /// Invokes a resolved method. A thrown managed exception is cleared and
    /// reported as `ManagedCallback`.
    fn call(
        &self,
        target: &Self::Object,
        method: ManagedMethod,
        args: &[Arg<'_, Self::Object>],
    ) -> Result<ManagedValue>;
}
