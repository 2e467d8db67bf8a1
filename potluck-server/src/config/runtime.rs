//! Runtime configuration re-exports.
//!
//! The validated config types live in `potluck_core::config`.

pub use potluck_core::config::{HostConfig, PinVerifier, ServerConfig, SharedConfig};
