//! `io.github.crow_misia.mediasoup.DataProducer` natives

use super::with_bridge;
use crate::error::BridgeError;
use jni::objects::{JByteArray, JObject};
use jni::sys::{jboolean, jint, jlong, JNI_FALSE};
use jni::JNIEnv;
use log::trace;

string_getter!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeGetId, data_producer_id);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeGetLocalId, data_producer_local_id);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeGetSctpStreamParameters, data_producer_sctp_stream_parameters);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeGetLabel, data_producer_label);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeGetProtocol, data_producer_protocol);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeGetAppData, data_producer_app_data);
bool_getter!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeIsClosed, data_producer_is_closed, true);
void_op!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeClose, data_producer_close);
dispose_op!(Java_io_github_crow_1misia_mediasoup_DataProducer_nativeDispose, dispose_data_producer);

/// Ordinal of `DataChannel.State`.
#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_DataProducer_nativeGetReadyState(
    mut env: JNIEnv,
    _this: JObject,
    data_producer: jlong,
) -> jint {
    trace!("nativeGetReadyState");
    with_bridge(&mut env, |_, context| context.data_producer_ready_state(data_producer))
        .unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_DataProducer_nativeGetBufferedAmount(
    mut env: JNIEnv,
    _this: JObject,
    data_producer: jlong,
) -> jlong {
    trace!("nativeGetBufferedAmount");
    with_bridge(&mut env, |_, context| context.data_producer_buffered_amount(data_producer))
        .unwrap_or(0)
}

/// Copies `buffer` out of the managed heap before handing it to the engine.
#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_DataProducer_nativeSend(
    mut env: JNIEnv,
    _this: JObject,
    data_producer: jlong,
    buffer: JByteArray,
    binary: jboolean,
) {
    trace!("nativeSend");
    let _ = with_bridge(&mut env, |env, context| {
        if buffer.is_null() {
            return Err(BridgeError::NullArgument("buffer"));
        }
        let data = env.convert_byte_array(&buffer)?;
        context.data_producer_send(data_producer, &data, binary != JNI_FALSE)
    });
}
