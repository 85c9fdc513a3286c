use std::future::Future;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::server::{router, ServerConfig, ServerError, ServerState};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// An HTTP server with an explicit, single-shot lifecycle.
///
/// Each instance owns its routes, configuration and connection tasks, so
/// several can run side by side (tests bind them to ephemeral ports).
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
    state: watch::Sender<ServerState>
}

impl HttpServer {
    /// Creates a server exposing the service routes.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_router(config, router())
    }

    /// Creates a server exposing a caller supplied router.
    pub fn with_router(config: ServerConfig, router: Router) -> Self {
        let (state, _) = watch::channel(ServerState::Starting);

        Self {
            config,
            router,
            state
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> ServerState {
        *self.state.borrow()
    }

    /// Returns a receiver that observes every lifecycle transition.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Binds the configured address.
    ///
    /// A failure is final: the server moves to `Stopped` and is not retried.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.address;

        TcpListener::bind(address).await.map_err(|source| {
            error!("Failed to bind {address}: {source}");
            self.transition(ServerState::Stopped);
            ServerError::Bind { address, source }
        })
    }

    /// Binds, serves until `shutdown` resolves, then drains in-flight requests.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    ///
    /// Every connection runs on its own task owned by this call. Once
    /// `shutdown` resolves the listener is closed and open connections are
    /// asked to finish their current request. Connections still open after
    /// `shutdown_timeout` are aborted, and only once they are gone does the
    /// server report `Stopped` with `ServerError::ShutdownTimeout`.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>
    {
        let address = listener.local_addr()?;
        let (drain_sender, drain_receiver) = watch::channel(());
        let mut connections = JoinSet::new();

        self.transition(ServerState::Serving);
        info!("Starting server on {address}");

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote)) => {
                        debug!("Accepted connection from {remote}");
                        self.spawn_connection(&mut connections, stream, drain_receiver.clone());
                    }
                    Err(error) => {
                        //NOTE: Usually descriptor exhaustion, which clears once connections close
                        warn!("Failed to accept connection: {error}");
                        sleep(ACCEPT_BACKOFF).await;
                    }
                },
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(error) = joined {
                        warn!("Connection task failed: {error}");
                    }
                }
            }
        }

        drop(listener);
        info!("Shutting down server...");
        self.transition(ServerState::ShuttingDown);
        drain_sender.send_replace(());

        let grace_period = self.config.shutdown_timeout;
        let drained = timeout(grace_period, async {
            while connections.join_next().await.is_some() {}
        }).await;

        if drained.is_ok() {
            self.transition(ServerState::Stopped);
            info!("Server stopped gracefully");
            return Ok(());
        }

        let remaining = connections.len();
        connections.abort_all();
        while connections.join_next().await.is_some() {}

        self.transition(ServerState::Stopped);
        error!("Server forced to shutdown after {grace_period:?}, aborted {remaining} connection(s)");
        Err(ServerError::ShutdownTimeout(grace_period))
    }

    fn spawn_connection(&self, connections: &mut JoinSet<()>, stream: TcpStream, mut drain: watch::Receiver<()>) {
        let service = TowerToHyperService::new(self.router.clone());

        connections.spawn(async move {
            let connection = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
            tokio::pin!(connection);

            let result = tokio::select! {
                result = connection.as_mut() => result,
                _ = drain.changed() => {
                    connection.as_mut().graceful_shutdown();
                    connection.as_mut().await
                }
            };

            if let Err(error) = result {
                debug!("Connection closed with error: {error}");
            }
        });
    }

    fn transition(&self, state: ServerState) {
        let previous = self.state.send_replace(state);
        debug!("Server state {previous:?} -> {state:?}");
    }
}
