//! Library load and unload
//!
//! The bridge has no engine of its own. The embedding library picks one and
//! exports the JVM hooks with [`export_jni_bridge!`](crate::export_jni_bridge):
//!
//! ```ignore
//! mediasoup_client_bridge::export_jni_bridge!(Arc::new(WebRtcEngine::default()));
//! ```

use super::runtime::{JniResolver, JniRuntime};
use super::types::{is_initialized, BRIDGE};
use crate::config::BridgeConfig;
use crate::descriptor::DescriptorRegistry;
use crate::engine::MediaEngine;
use crate::lifecycle;
use jni::sys::{jint, JNI_ERR, JNI_VERSION_1_6};
use jni::JavaVM;
use log::{info, warn};
use std::sync::Arc;

/// Body of `JNI_OnLoad`.
///
/// Resolves every managed descriptor, initializes the engine and installs the
/// bridge. Returns `JNI_ERR` if any of that fails, which makes the JVM refuse
/// the library.
pub fn on_load(vm: JavaVM, engine: Arc<dyn MediaEngine>, config: BridgeConfig) -> jint {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(config.log.level_filter())
            .with_tag(config.log.tag.clone()),
    );

    if is_initialized() {
        warn!("JNI_OnLoad with a bridge already installed");
    }
    info!("Loading mediasoup client bridge");

    let result = lifecycle::load(
        &BRIDGE,
        move || {
            let registry = {
                let mut env = vm.get_env()?;
                DescriptorRegistry::initialize(&mut JniResolver::new(&mut env))?
            };
            Ok(JniRuntime::new(vm, registry))
        },
        engine,
        config,
    );
    match result {
        Ok(()) => JNI_VERSION_1_6,
        Err(_) => JNI_ERR,
    }
}

/// Body of `JNI_OnUnload`.
pub fn on_unload() {
    info!("Unloading mediasoup client bridge");
    lifecycle::unload(&BRIDGE);
}

/// Exports `JNI_OnLoad` and `JNI_OnUnload` over the given engine.
///
/// The optional second argument is a [`BridgeConfig`]; defaults apply when it
/// is omitted.
#[macro_export]
macro_rules! export_jni_bridge {
    ($engine:expr) => {
        $crate::export_jni_bridge!($engine, $crate::BridgeConfig::default());
    };
    ($engine:expr, $config:expr) => {
        #[no_mangle]
        pub extern "system" fn JNI_OnLoad(
            vm: $crate::jni_bridge::jni::JavaVM,
            _reserved: *mut ::std::ffi::c_void,
        ) -> $crate::jni_bridge::jni::sys::jint {
            $crate::jni_bridge::on_load(vm, $engine, $config)
        }

        #[no_mangle]
        pub extern "system" fn JNI_OnUnload(
            _vm: $crate::jni_bridge::jni::JavaVM,
            _reserved: *mut ::std::ffi::c_void,
        ) {
            $crate::jni_bridge::on_unload();
        }
    };
}
