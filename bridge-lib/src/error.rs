use std::{fmt, result};

use thiserror::Error;

use crate::descriptor::managed_class;

/// Exception class raised on the managed side for native-domain failures.
pub const MEDIASOUP_EXCEPTION_CLASS: &str = managed_class!("MediasoupException");
pub const ILLEGAL_STATE_EXCEPTION_CLASS: &str = "java/lang/IllegalStateException";
pub const ILLEGAL_ARGUMENT_EXCEPTION_CLASS: &str = "java/lang/IllegalArgumentException";
pub const NULL_POINTER_EXCEPTION_CLASS: &str = "java/lang/NullPointerException";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("{0}")]
    NativeOperationFailed(String),
    #[error("invalid {kind} handle: {handle}")]
    InvalidHandle { kind: &'static str, handle: i64 },
    #[error("initialization failed: {0}")]
    InitializationFailed(String),
    #[error("bridge is not initialized")]
    NotInitialized,
    #[error("managed callback failed: {0}")]
    ManagedCallback(String),
    #[error("callback dispatcher is closed")]
    DispatcherClosed,
    #[error("{0} must not be null")]
    NullArgument(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = result::Result<T, BridgeError>;

impl BridgeError {
    pub fn malformed<T: fmt::Display>(inner: T) -> Self {
        Self::MalformedPayload(inner.to_string())
    }
    pub fn native<T: fmt::Display>(inner: T) -> Self {
        Self::NativeOperationFailed(inner.to_string())
    }
    pub fn initialization<T: fmt::Display>(inner: T) -> Self {
        Self::InitializationFailed(inner.to_string())
    }
    pub fn managed<T: fmt::Display>(inner: T) -> Self {
        Self::ManagedCallback(inner.to_string())
    }
    pub fn invalid_argument<T: fmt::Display>(inner: T) -> Self {
        Self::InvalidArgument(inner.to_string())
    }
    pub fn config<T: fmt::Display>(inner: T) -> Self {
        Self::Config(inner.to_string())
    }
    pub fn invalid_handle(kind: &'static str, handle: i64) -> Self {
        Self::InvalidHandle { kind, handle }
    }

    /// Binary name of the managed exception class this error is raised as.
    pub fn managed_class(&self) -> &'static str {
        match self {
            Self::InvalidHandle { .. } | Self::NotInitialized => ILLEGAL_STATE_EXCEPTION_CLASS,
            Self::NullArgument(_) => NULL_POINTER_EXCEPTION_CLASS,
            Self::InvalidArgument(_) => ILLEGAL_ARGUMENT_EXCEPTION_CLASS,
            _ => MEDIASOUP_EXCEPTION_CLASS,
        }
    }
}

/// Failure reported by the native media engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NativeFault {
    pub message: String,
}

impl NativeFault {
    pub fn new<T: fmt::Display>(message: T) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl From<NativeFault> for BridgeError {
    fn from(fault: NativeFault) -> Self {
        Self::NativeOperationFailed(fault.message)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
