use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: io::Error
    },
    #[error("server error: {0}")]
    Serve(#[from] io::Error),
    #[error("server forced to shutdown: in-flight requests still running after {0:?}")]
    ShutdownTimeout(Duration)
}
