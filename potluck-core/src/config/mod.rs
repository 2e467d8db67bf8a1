//! Runtime configuration types for the potluck service.
//!
//! These are the validated values the server works with. Loading and parsing
//! the TOML file is handled by the server crate.

mod host;
mod server;

pub use host::{HostConfig, PinVerifier};
pub use server::ServerConfig;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared configuration state with a separate lock per section.
///
/// A reload replaces each section independently, so readers of one section
/// never wait on writers of another.
#[derive(Clone)]
pub struct SharedConfig {
    pub server: Arc<RwLock<ServerConfig>>,
    pub host: Arc<RwLock<HostConfig>>,
}

impl SharedConfig {
    pub fn new(server: ServerConfig, host: HostConfig) -> Self {
        Self {
            server: Arc::new(RwLock::new(server)),
            host: Arc::new(RwLock::new(host)),
        }
    }
}
