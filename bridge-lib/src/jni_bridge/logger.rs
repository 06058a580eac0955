//! `io.github.crow_misia.mediasoup.Logger` natives
//!
//! These are `@JvmStatic` on the companion object, so they receive the class
//! rather than an instance.

use super::{global_listener, with_bridge};
use crate::guard::shield;
use crate::handle::NULL_HANDLE;
use jni::objects::{JClass, JObject};
use jni::sys::{jint, jlong};
use jni::JNIEnv;
use log::trace;

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Logger_nativeSetHandler(
    mut env: JNIEnv,
    _class: JClass,
    handler: JObject,
) -> jlong {
    trace!("nativeSetHandler");
    with_bridge(&mut env, |env, context| {
        let handler = global_listener(env, "handler", &handler)?;
        context.set_log_handler(handler)
    })
    .unwrap_or(NULL_HANDLE)
}

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Logger_nativeSetLogLevel(
    mut env: JNIEnv,
    _class: JClass,
    level: jint,
) {
    trace!("nativeSetLogLevel");
    let _ = with_bridge(&mut env, |_, context| context.set_log_level(level));
}

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Logger_nativeDispose(
    _env: JNIEnv,
    _class: JClass,
    handler: jlong,
) {
    trace!("nativeDispose");
    shield("dispose_log_handler", || {
        super::types::BRIDGE.current()?.dispose_log_handler(handler)
    });
}
