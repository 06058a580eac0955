//! `io.github.crow_misia.mediasoup.Device` natives

use super::{
    global_listener, opt_string, required_string, to_jboolean, to_jobject, with_bridge,
};
use crate::bridge::TransportParams;
use crate::engine::NativePtr;
use crate::handle::NULL_HANDLE;
use jni::objects::{JObject, JString};
use jni::sys::{jboolean, jlong, jobject};
use jni::JNIEnv;
use log::{debug, trace};

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Device_nativeNewDevice(
    mut env: JNIEnv,
    _this: JObject,
) -> jlong {
    trace!("nativeNewDevice");
    with_bridge(&mut env, |_, context| context.create_device()).unwrap_or(NULL_HANDLE)
}

dispose_op!(Java_io_github_crow_1misia_mediasoup_Device_nativeDispose, dispose_device);
bool_getter!(Java_io_github_crow_1misia_mediasoup_Device_nativeIsLoaded, device_is_loaded, false);
string_getter!(Java_io_github_crow_1misia_mediasoup_Device_nativeGetRtpCapabilities, device_rtp_capabilities);
string_getter!(Java_io_github_crow_1misia_mediasoup_Device_nativeGetSctpCapabilities, device_sctp_capabilities);

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Device_nativeLoad(
    mut env: JNIEnv,
    _this: JObject,
    device: jlong,
    router_rtp_capabilities: JString,
    rtc_configuration: JString,
    peer_connection_factory: jlong,
) {
    trace!("nativeLoad");
    let _ = with_bridge(&mut env, |env, context| {
        let capabilities = opt_string(env, &router_rtp_capabilities)?;
        let configuration = opt_string(env, &rtc_configuration)?;
        context.device_load(
            device,
            capabilities.as_deref(),
            configuration.as_deref(),
            NativePtr(peer_connection_factory),
        )
    });
}

#[no_mangle]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Device_nativeCanProduce(
    mut env: JNIEnv,
    _this: JObject,
    device: jlong,
    kind: JString,
) -> jboolean {
    trace!("nativeCanProduce");
    with_bridge(&mut env, |env, context| {
        let kind = required_string(env, "kind", &kind)?;
        context.device_can_produce(device, &kind)
    })
    .map(to_jboolean)
    .unwrap_or(to_jboolean(false))
}

/// Strings shared by both transport constructors.
struct TransportArgs {
    id: Option<String>,
    ice_parameters: Option<String>,
    ice_candidates: Option<String>,
    dtls_parameters: Option<String>,
    sctp_parameters: Option<String>,
    rtc_configuration: Option<String>,
    app_data: Option<String>,
}

impl TransportArgs {
    fn params(&self, peer_connection_factory: jlong) -> TransportParams<'_> {
        TransportParams {
            id: self.id.as_deref(),
            ice_parameters: self.ice_parameters.as_deref(),
            ice_candidates: self.ice_candidates.as_deref(),
            dtls_parameters: self.dtls_parameters.as_deref(),
            sctp_parameters: self.sctp_parameters.as_deref(),
            rtc_configuration: self.rtc_configuration.as_deref(),
            peer_connection_factory: NativePtr(peer_connection_factory),
            app_data: self.app_data.as_deref(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn read_transport_args(
    env: &mut JNIEnv,
    id: &JString,
    ice_parameters: &JString,
    ice_candidates: &JString,
    dtls_parameters: &JString,
    sctp_parameters: &JString,
    rtc_configuration: &JString,
    app_data: &JString,
) -> crate::Result<TransportArgs> {
    Ok(TransportArgs {
        id: opt_string(env, id)?,
        ice_parameters: opt_string(env, ice_parameters)?,
        ice_candidates: opt_string(env, ice_candidates)?,
        dtls_parameters: opt_string(env, dtls_parameters)?,
        sctp_parameters: opt_string(env, sctp_parameters)?,
        rtc_configuration: opt_string(env, rtc_configuration)?,
        app_data: opt_string(env, app_data)?,
    })
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Device_nativeCreateSendTransport(
    mut env: JNIEnv,
    _this: JObject,
    device: jlong,
    listener: JObject,
    id: JString,
    ice_parameters: JString,
    ice_candidates: JString,
    dtls_parameters: JString,
    sctp_parameters: JString,
    rtc_configuration: JString,
    peer_connection_factory: jlong,
    app_data: JString,
) -> jobject {
    trace!("nativeCreateSendTransport");
    with_bridge(&mut env, |env, context| {
        let listener = global_listener(env, "listener", &listener)?;
        let args = read_transport_args(
            env,
            &id,
            &ice_parameters,
            &ice_candidates,
            &dtls_parameters,
            &sctp_parameters,
            &rtc_configuration,
            &app_data,
        )?;
        let transport =
            context.create_send_transport(device, listener, args.params(peer_connection_factory))?;
        debug!("Send transport {:?} created", args.id);
        to_jobject(env, &transport)
    })
    .unwrap_or(std::ptr::null_mut())
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn Java_io_github_crow_1misia_mediasoup_Device_nativeCreateRecvTransport(
    mut env: JNIEnv,
    _this: JObject,
    device: jlong,
    listener: JObject,
    id: JString,
    ice_parameters: JString,
    ice_candidates: JString,
    dtls_parameters: JString,
    sctp_parameters: JString,
    rtc_configuration: JString,
    peer_connection_factory: jlong,
    app_data: JString,
) -> jobject {
    trace!("nativeCreateRecvTransport");
    with_bridge(&mut env, |env, context| {
        let listener = global_listener(env, "listener", &listener)?;
        let args = read_transport_args(
            env,
            &id,
            &ice_parameters,
            &ice_candidates,
            &dtls_parameters,
            &sctp_parameters,
            &rtc_configuration,
            &app_data,
        )?;
        let transport =
            context.create_recv_transport(device, listener, args.params(peer_connection_factory))?;
        debug!("Recv transport {:?} created", args.id);
        to_jobject(env, &transport)
    })
    .unwrap_or(std::ptr::null_mut())
}
