//! Global state for the JNI bridge
//!
//! The bridge slot is the only process-wide state. It is filled by
//! `JNI_OnLoad` and emptied by `JNI_OnUnload`.

use super::runtime::JniRuntime;
use crate::lifecycle::BridgeSlot;

/// Installed bridge context
pub static BRIDGE: BridgeSlot<JniRuntime> = BridgeSlot::new();

/// Helper to check if the library finished loading
pub fn is_initialized() -> bool {
    BRIDGE.is_installed()
}
