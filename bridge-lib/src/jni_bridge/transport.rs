//! `io.github.crow_misia.mediasoup.Transport` natives, shared by both directions

use super::{opt_string, with_bridge};
use jni::objects::{JObject, JString};
use jni::sys::jlong;
use jni::JNIEnv;
use log::trace;

string_getter!(Java_io_github_crow_1misia_mediasoup_Transport_nativeGetId, transport_id);
bool_getter!(Java_io_github_crow_1misia_mediasoup_Transport_nativeIsClosed, transport_is_closed, true);
string_getter!(Java_io_github_crow_1misia_mediasoup_Transport_nativeGetConnectionState, transport_connection_state);
string_getter!(Java_io_github_crow_1misia_mediasoup_Transport_nativeGetAppData, transport_app_data);
void_op!(Java_io_github_crow_1misia_mediasoup_Transport_nativeClose, transport_close);
string_getter!(Java_io_github_crow_1misia_mediasoup_Transport_nativeGetStats, transport_stats);
dispose_op!(Java_io_github_crow_1misia_mediasoup_Transport_nativeDispose, dispose_transport);

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Transport_nativeRestartIce(
    mut env: JNIEnv,
    _this: JObject,
    transport: jlong,
    ice_parameters: JString,
) {
    trace!("nativeRestartIce");
    let _ = with_bridge(&mut env, |env, context| {
        let ice_parameters = opt_string(env, &ice_parameters)?;
        context.transport_restart_ice(transport, ice_parameters.as_deref())
    });
}

/// `iceServers` arrives as a JSON array of `RTCIceServer` documents.
#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Transport_nativeUpdateIceServers(
    mut env: JNIEnv,
    _this: JObject,
    transport: jlong,
    ice_servers: JString,
) {
    trace!("nativeUpdateIceServers");
    let _ = with_bridge(&mut env, |env, context| {
        let ice_servers = opt_string(env, &ice_servers)?;
        context.transport_update_ice_servers(transport, ice_servers.as_deref())
    });
}
