use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub listen: SocketAddr,
}

impl ServerConfig {
    pub fn new(listen: SocketAddr) -> Self {
        Self { listen }
    }
}
