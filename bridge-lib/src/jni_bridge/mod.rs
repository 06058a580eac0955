//! JNI bridge for Android
//!
//! Exposes the bridge operations as `Java_io_github_crow_1misia_mediasoup_*`
//! symbols for the managed `io.github.crow_misia.mediasoup` classes.
//!
//! ## Architecture
//!
//! - `types`: the process-wide bridge slot
//! - `runtime`: `ManagedRuntime` over a `JavaVM` and resolved descriptors
//! - `lifecycle`: `JNI_OnLoad`/`JNI_OnUnload` and the export macro
//! - one module per managed class with its native methods
//!
//! ## Calling convention
//!
//! Every entry point runs inside the fault guard. On failure exactly one
//! managed exception is pending when the function returns, and the return
//! value is a sentinel: null for objects and strings, `0` for numbers, `false`
//! for booleans (`true` for `isClosed`).
//!
//! ## Thread Model
//!
//! - Entry points run on the calling managed thread
//! - Fire-and-forget listener events run on the engine thread that raised them
//! - Reply-bearing listener callbacks run on the dispatcher's threads
//! - Native threads are attached permanently on first callback

/// Getter returning a string, null on failure.
macro_rules! string_getter {
    ($symbol:ident, $op:ident) => {
        #[no_mangle]
        pub extern "C" fn $symbol(
            mut env: $crate::jni_bridge::jni::JNIEnv,
            _this: $crate::jni_bridge::jni::objects::JObject,
            handle: $crate::jni_bridge::jni::sys::jlong,
        ) -> $crate::jni_bridge::jni::sys::jstring {
            log::trace!("{}", stringify!($op));
            $crate::jni_bridge::with_bridge(&mut env, |env, context| {
                let value = context.$op(handle)?;
                $crate::jni_bridge::to_jstring(env, &value)
            })
            .unwrap_or(std::ptr::null_mut())
        }
    };
}

/// Getter returning a boolean, `$sentinel` on failure.
macro_rules! bool_getter {
    ($symbol:ident, $op:ident, $sentinel:expr) => {
        #[no_mangle]
        pub extern "C" fn $symbol(
            mut env: $crate::jni_bridge::jni::JNIEnv,
            _this: $crate::jni_bridge::jni::objects::JObject,
            handle: $crate::jni_bridge::jni::sys::jlong,
        ) -> $crate::jni_bridge::jni::sys::jboolean {
            log::trace!("{}", stringify!($op));
            $crate::jni_bridge::with_bridge(&mut env, |_, context| context.$op(handle))
                .map($crate::jni_bridge::to_jboolean)
                .unwrap_or($crate::jni_bridge::to_jboolean($sentinel))
        }
    };
}

/// Getter returning a native pointer, `0` on failure.
macro_rules! pointer_getter {
    ($symbol:ident, $op:ident) => {
        #[no_mangle]
        pub extern "C" fn $symbol(
            mut env: $crate::jni_bridge::jni::JNIEnv,
            _this: $crate::jni_bridge::jni::objects::JObject,
            handle: $crate::jni_bridge::jni::sys::jlong,
        ) -> $crate::jni_bridge::jni::sys::jlong {
            log::trace!("{}", stringify!($op));
            $crate::jni_bridge::with_bridge(&mut env, |_, context| context.$op(handle))
                .map(|pointer| pointer.0)
                .unwrap_or(0)
        }
    };
}

/// Operation without a result.
macro_rules! void_op {
    ($symbol:ident, $op:ident) => {
        #[no_mangle]
        pub extern "C" fn $symbol(
            mut env: $crate::jni_bridge::jni::JNIEnv,
            _this: $crate::jni_bridge::jni::objects::JObject,
            handle: $crate::jni_bridge::jni::sys::jlong,
        ) {
            log::trace!("{}", stringify!($op));
            let _ = $crate::jni_bridge::with_bridge(&mut env, |_, context| context.$op(handle));
        }
    };
}

/// Disposal never raises; a stale handle is only logged.
macro_rules! dispose_op {
    ($symbol:ident, $op:ident) => {
        #[no_mangle]
        pub extern "C" fn $symbol(
            _env: $crate::jni_bridge::jni::JNIEnv,
            _this: $crate::jni_bridge::jni::objects::JObject,
            handle: $crate::jni_bridge::jni::sys::jlong,
        ) {
            log::trace!("{}", stringify!($op));
            $crate::guard::shield(stringify!($op), || {
                $crate::jni_bridge::types::BRIDGE.current()?.$op(handle)
            });
        }
    };
}

pub mod consumer;
pub mod data_consumer;
pub mod data_producer;
pub mod device;
pub mod lifecycle;
pub mod logger;
pub mod producer;
pub mod recv_transport;
pub mod runtime;
pub mod send_transport;
pub mod transport;
pub mod types;

pub use jni;
pub use lifecycle::{on_load, on_unload};
pub use runtime::{JniResolver, JniRuntime};

use crate::bridge::BridgeContext;
use crate::error::{BridgeError, Result};
use jni::objects::{GlobalRef, JObject, JString};
use jni::sys::{jboolean, jobject, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use types::BRIDGE;

/// Runs `op` against the installed bridge inside the fault guard.
pub(crate) fn with_bridge<'local, T, F>(env: &mut JNIEnv<'local>, op: F) -> Option<T>
where
    F: FnOnce(&mut JNIEnv<'local>, &BridgeContext<JniRuntime>) -> Result<T>,
{
    BRIDGE.enter(env, op)
}

/// Reads a nullable managed string.
pub(crate) fn opt_string(env: &mut JNIEnv, value: &JString) -> Result<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(env.get_string(value)?.into()))
}

pub(crate) fn required_string(
    env: &mut JNIEnv,
    name: &'static str,
    value: &JString,
) -> Result<String> {
    opt_string(env, value)?.ok_or(BridgeError::NullArgument(name))
}

pub(crate) fn to_jstring(env: &mut JNIEnv, value: &str) -> Result<jstring> {
    Ok(env.new_string(value)?.into_raw())
}

/// Promotes a listener argument to a global reference owned by its trampoline.
pub(crate) fn global_listener(
    env: &mut JNIEnv,
    name: &'static str,
    listener: &JObject,
) -> Result<GlobalRef> {
    if listener.is_null() {
        return Err(BridgeError::NullArgument(name));
    }
    Ok(env.new_global_ref(listener)?)
}

/// Returns a new local reference to a wrapper the bridge keeps globally.
pub(crate) fn to_jobject(env: &mut JNIEnv, wrapper: &GlobalRef) -> Result<jobject> {
    Ok(env.new_local_ref(wrapper.as_obj())?.into_raw())
}

pub(crate) fn to_jboolean(value: bool) -> jboolean {
    if value {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

