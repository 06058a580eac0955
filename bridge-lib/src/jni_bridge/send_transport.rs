//! `io.github.crow_misia.mediasoup.SendTransport` natives

use super::{global_listener, opt_string, to_jobject, with_bridge};
use crate::bridge::{ProduceDataParams, ProduceParams};
use crate::engine::NativePtr;
use jni::objects::{JObject, JString};
use jni::sys::{jboolean, jint, jlong, jobject, JNI_FALSE};
use jni::JNIEnv;
use log::trace;

/// `encodings` is a JSON array of `RTCRtpEncodingParameters`; null means one
/// default encoding.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_SendTransport_nativeProduce(
    mut env: JNIEnv,
    _this: JObject,
    transport: jlong,
    listener: JObject,
    track: jlong,
    encodings: JString,
    codec_options: JString,
    codec: JString,
    app_data: JString,
) -> jobject {
    trace!("nativeProduce");
    with_bridge(&mut env, |env, context| {
        let listener = global_listener(env, "listener", &listener)?;
        let encodings = opt_string(env, &encodings)?;
        let codec_options = opt_string(env, &codec_options)?;
        let codec = opt_string(env, &codec)?;
        let app_data = opt_string(env, &app_data)?;
        let producer = context.produce(
            transport,
            listener,
            ProduceParams {
                track: NativePtr(track),
                encodings: encodings.as_deref(),
                codec_options: codec_options.as_deref(),
                codec: codec.as_deref(),
                app_data: app_data.as_deref(),
            },
        )?;
        to_jobject(env, &producer)
    })
    .unwrap_or(std::ptr::null_mut())
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_SendTransport_nativeProduceData(
    mut env: JNIEnv,
    _this: JObject,
    transport: jlong,
    listener: JObject,
    label: JString,
    protocol: JString,
    ordered: jboolean,
    max_retransmits: jint,
    max_packet_life_time: jint,
    app_data: JString,
) -> jobject {
    trace!("nativeProduceData");
    with_bridge(&mut env, |env, context| {
        let listener = global_listener(env, "listener", &listener)?;
        let label = opt_string(env, &label)?;
        let protocol = opt_string(env, &protocol)?;
        let app_data = opt_string(env, &app_data)?;
        let data_producer = context.produce_data(
            transport,
            listener,
            ProduceDataParams {
                label: label.as_deref(),
                protocol: protocol.as_deref(),
                ordered: ordered != JNI_FALSE,
                max_retransmits,
                max_packet_life_time,
                app_data: app_data.as_deref(),
            },
        )?;
        to_jobject(env, &data_producer)
    })
    .unwrap_or(std::ptr::null_mut())
}
