#[cfg(test)]
#[macro_use]
mod tests;

pub mod bridge;
pub mod codec;
pub mod config;
pub mod descriptor;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod guard;
pub mod handle;
pub mod lifecycle;
pub mod runtime;
pub mod trampoline;

#[cfg(feature = "jni-bridge")]
pub mod jni_bridge;

pub use bridge::BridgeContext;
pub use codec::Document;
pub use config::BridgeConfig;
pub use error::{BridgeError, NativeFault, Result};
pub use handle::Handle;
