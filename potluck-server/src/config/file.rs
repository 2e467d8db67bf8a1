//! TOML file configuration structures.
//!
//! These structs map directly onto `potluck-config.toml`.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub host: HostConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// The host PIN. A plaintext value (anything not starting with
    /// `$argon2`) is hashed on load and written back to the file.
    pub pin: String,
}

impl FileConfig {
    pub fn is_pin_hashed(&self) -> bool {
        self.host.pin.starts_with("$argon2")
    }
}
