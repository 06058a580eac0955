//! `io.github.crow_misia.mediasoup.RecvTransport` natives

use super::{global_listener, opt_string, to_jobject, with_bridge};
use crate::bridge::{ConsumeDataParams, ConsumeParams};
use jni::objects::{JObject, JString};
use jni::sys::{jint, jlong, jobject};
use jni::JNIEnv;
use log::trace;

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_RecvTransport_nativeConsume(
    mut env: JNIEnv,
    _this: JObject,
    transport: jlong,
    listener: JObject,
    id: JString,
    producer_id: JString,
    kind: JString,
    rtp_parameters: JString,
    app_data: JString,
) -> jobject {
    trace!("nativeConsume");
    with_bridge(&mut env, |env, context| {
        let listener = global_listener(env, "listener", &listener)?;
        let id = opt_string(env, &id)?;
        let producer_id = opt_string(env, &producer_id)?;
        let kind = opt_string(env, &kind)?;
        let rtp_parameters = opt_string(env, &rtp_parameters)?;
        let app_data = opt_string(env, &app_data)?;
        let consumer = context.consume(
            transport,
            listener,
            ConsumeParams {
                id: id.as_deref(),
                producer_id: producer_id.as_deref(),
                kind: kind.as_deref(),
                rtp_parameters: rtp_parameters.as_deref(),
                app_data: app_data.as_deref(),
            },
        )?;
        to_jobject(env, &consumer)
    })
    .unwrap_or(std::ptr::null_mut())
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_RecvTransport_nativeConsumeData(
    mut env: JNIEnv,
    _this: JObject,
    transport: jlong,
    listener: JObject,
    id: JString,
    producer_id: JString,
    stream_id: jint,
    label: JString,
    protocol: JString,
    app_data: JString,
) -> jobject {
    trace!("nativeConsumeData");
    with_bridge(&mut env, |env, context| {
        let listener = global_listener(env, "listener", &listener)?;
        let id = opt_string(env, &id)?;
        let data_producer_id = opt_string(env, &producer_id)?;
        let label = opt_string(env, &label)?;
        let protocol = opt_string(env, &protocol)?;
        let app_data = opt_string(env, &app_data)?;
        let data_consumer = context.consume_data(
            transport,
            listener,
            ConsumeDataParams {
                id: id.as_deref(),
                data_producer_id: data_producer_id.as_deref(),
                stream_id,
                label: label.as_deref(),
                protocol: protocol.as_deref(),
                app_data: app_data.as_deref(),
            },
        )?;
        to_jobject(env, &data_consumer)
    })
    .unwrap_or(std::ptr::null_mut())
}
