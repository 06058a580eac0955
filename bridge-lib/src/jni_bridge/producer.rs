//! `io.github.crow_misia.mediasoup.Producer` natives

use super::with_bridge;
use crate::engine::NativePtr;
use jni::objects::JObject;
use jni::sys::{jint, jlong};
use jni::JNIEnv;
use log::trace;

string_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeGetId, producer_id);
string_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeGetLocalId, producer_local_id);
bool_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeIsClosed, producer_is_closed, true);
string_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeGetKind, producer_kind);
pointer_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeGetRtpSender, producer_rtp_sender);
pointer_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeGetTrack, producer_track);
string_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeGetRtpParameters, producer_rtp_parameters);
bool_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeIsPaused, producer_is_paused, false);
string_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeGetAppData, producer_app_data);
void_op!(Java_io_github_crow_1misia_mediasoup_Producer_nativeClose, producer_close);
string_getter!(Java_io_github_crow_1misia_mediasoup_Producer_nativeGetStats, producer_stats);
void_op!(Java_io_github_crow_1misia_mediasoup_Producer_nativePause, producer_pause);
void_op!(Java_io_github_crow_1misia_mediasoup_Producer_nativeResume, producer_resume);
dispose_op!(Java_io_github_crow_1misia_mediasoup_Producer_nativeDispose, dispose_producer);

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Producer_nativeGetMaxSpatialLayer(
    mut env: JNIEnv,
    _this: JObject,
    producer: jlong,
) -> jint {
    trace!("nativeGetMaxSpatialLayer");
    with_bridge(&mut env, |_, context| context.producer_max_spatial_layer(producer)).unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Producer_nativeSetMaxSpatialLayer(
    mut env: JNIEnv,
    _this: JObject,
    producer: jlong,
    spatial_layer: jint,
) {
    trace!("nativeSetMaxSpatialLayer");
    let _ = with_bridge(&mut env, |_, context| {
        context.producer_set_max_spatial_layer(producer, spatial_layer)
    });
}

/// `track` is a native `MediaStreamTrackInterface`, `0` to stop sending.
#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Producer_nativeReplaceTrack(
    mut env: JNIEnv,
    _this: JObject,
    producer: jlong,
    track: jlong,
) {
    trace!("nativeReplaceTrack");
    let _ = with_bridge(&mut env, |_, context| {
        context.producer_replace_track(producer, NativePtr(track))
    });
}
