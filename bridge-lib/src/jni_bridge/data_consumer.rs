//! `io.github.crow_misia.mediasoup.DataConsumer` natives

use super::with_bridge;
use jni::objects::JObject;
use jni::sys::{jint, jlong};
use jni::JNIEnv;
use log::trace;

string_getter!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeGetId, data_consumer_id);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeGetLocalId, data_consumer_local_id);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeGetDataProducerId, data_consumer_data_producer_id);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeGetSctpStreamParameters, data_consumer_sctp_stream_parameters);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeGetLabel, data_consumer_label);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeGetProtocol, data_consumer_protocol);
string_getter!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeGetAppData, data_consumer_app_data);
bool_getter!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeIsClosed, data_consumer_is_closed, true);
void_op!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeClose, data_consumer_close);
dispose_op!(Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeDispose, dispose_data_consumer);

/// Ordinal of `DataChannel.State`.
#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_DataConsumer_nativeGetReadyState(
    mut env: JNIEnv,
    _this: JObject,
    data_consumer: jlong,
) -> jint {
    trace!("nativeGetReadyState");
    with_bridge(&mut env, |_, context| context.data_consumer_ready_state(data_consumer))
        .unwrap_or(0)
}
