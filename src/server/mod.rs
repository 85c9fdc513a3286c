mod errors;
mod http_server;
mod routes;
mod signal;
#[cfg(test)]
mod tests;

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

pub use errors::ServerError;
pub use http_server::HttpServer;
pub use routes::{router, HealthResponse};
pub use signal::shutdown_signal;

pub const DEFAULT_ADDRESS: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for a single [`HttpServer`] instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub address: SocketAddr,
    /// How long in-flight requests may run once shutdown has been requested.
    pub shutdown_timeout: Duration
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT
        }
    }
}

/// Lifecycle of an [`HttpServer`].
///
/// `Starting` moves straight to `Stopped` when the listener cannot be bound.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ServerState {
    Starting,
    Serving,
    ShuttingDown,
    Stopped
}
