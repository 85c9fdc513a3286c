use super::{router, HealthResponse, HttpServer, ServerConfig, ServerError, ServerState, DEFAULT_SHUTDOWN_TIMEOUT};

use std::future::pending;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::time::sleep;
use tower::ServiceExt;

fn local_config(shutdown_timeout: Duration) -> Result<ServerConfig> {
    Ok(ServerConfig {
        address: "127.0.0.1:0".parse()?,
        shutdown_timeout
    })
}

fn router_with_slow_route(delay: Duration) -> (Router, Arc<AtomicBool>) {
    let finished = Arc::new(AtomicBool::new(false));
    let handler_finished = finished.clone();

    let router = router().route("/slow", get(move || {
        let handler_finished = handler_finished.clone();

        async move {
            sleep(delay).await;
            handler_finished.store(true, Ordering::SeqCst);
            "done"
        }
    }));

    (router, finished)
}

async fn send(router: &Router, method: &str, path: &str) -> Result<(StatusCode, Option<String>, Vec<u8>)> {
    let request = Request::builder().method(method).uri(path).body(Body::empty())?;
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE)
        .map(|value| value.to_str().map(str::to_string))
        .transpose()?;
    let body = response.into_body().collect().await?.to_bytes().to_vec();

    Ok((status, content_type, body))
}

async fn send_raw_request(address: SocketAddr, path: &str) -> Result<String> {
    let mut stream = TcpStream::connect(address).await?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: {address}\r\nConnection: close\r\n\r\n");

    stream.write_all(request.as_bytes()).await?;

    let mut buffer = Vec::new();
    stream.read_to_end(&mut buffer).await?;

    Ok(String::from_utf8(buffer)?)
}

#[test]
fn test_default_config_listens_on_8080_with_five_second_grace() {
    let config = ServerConfig::default();

    assert_eq!(config.address.port(), 8080);
    assert!(config.address.ip().is_unspecified());
    assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
    assert_eq!(config.shutdown_timeout, DEFAULT_SHUTDOWN_TIMEOUT);
}

#[tokio::test]
async fn test_health_returns_ok_status_as_json() -> Result<()> {
    let (status, content_type, body) = send(&router(), "GET", "/health").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(String::from_utf8(body.clone())?, r#"{"status":"ok"}"#);
    assert_eq!(serde_json::from_slice::<HealthResponse>(&body)?, HealthResponse { status: "ok".to_string() });

    Ok(())
}

#[tokio::test]
async fn test_health_rejects_other_methods() -> Result<()> {
    for method in ["HEAD", "POST", "PUT", "DELETE"] {
        let (status, _, _) = send(&router(), method, "/health").await?;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} /health");
    }

    Ok(())
}

#[tokio::test]
async fn test_unknown_paths_are_not_found() -> Result<()> {
    let (status, _, _) = send(&router(), "GET", "/transactions").await?;

    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_bind_failure_stops_server_without_serving() -> Result<()> {
    let occupied = TcpListener::bind("127.0.0.1:0").await?;
    let address = occupied.local_addr()?;

    let server = HttpServer::new(ServerConfig {
        address,
        shutdown_timeout: Duration::from_millis(100)
    });
    let states = server.subscribe();

    let result = server.run(pending()).await;

    assert!(matches!(result, Err(ServerError::Bind { address: failed, .. }) if failed == address));
    assert_eq!(*states.borrow(), ServerState::Stopped);

    Ok(())
}

#[tokio::test]
async fn test_serves_health_over_tcp_and_stops_cleanly() -> Result<()> {
    let server = HttpServer::new(local_config(Duration::from_secs(5))?);
    let states = server.subscribe();

    assert_eq!(server.state(), ServerState::Starting);

    let listener = server.bind().await?;
    let address = listener.local_addr()?;
    let (trigger, shutdown) = oneshot::channel::<()>();
    let running = tokio::spawn(server.serve(listener, async move {
        let _ = shutdown.await;
    }));

    let response = send_raw_request(address, "/health").await?;

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.ends_with(r#"{"status":"ok"}"#), "{response}");
    assert_eq!(*states.borrow(), ServerState::Serving);

    let _ = trigger.send(());

    assert!(running.await?.is_ok());
    assert_eq!(*states.borrow(), ServerState::Stopped);

    Ok(())
}

#[tokio::test]
async fn test_shutdown_waits_for_in_flight_requests() -> Result<()> {
    let (slow_router, finished) = router_with_slow_route(Duration::from_millis(300));
    let server = HttpServer::with_router(local_config(Duration::from_secs(5))?, slow_router);
    let states = server.subscribe();
    let listener = server.bind().await?;
    let address = listener.local_addr()?;
    let (trigger, shutdown) = oneshot::channel::<()>();
    let running = tokio::spawn(server.serve(listener, async move {
        let _ = shutdown.await;
    }));

    let request = tokio::spawn(send_raw_request(address, "/slow"));
    sleep(Duration::from_millis(100)).await;
    let _ = trigger.send(());

    sleep(Duration::from_millis(50)).await;
    assert_eq!(*states.borrow(), ServerState::ShuttingDown);

    let response = request.await??;

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.ends_with("done"), "{response}");
    assert!(finished.load(Ordering::SeqCst));
    assert!(running.await?.is_ok());
    assert_eq!(*states.borrow(), ServerState::Stopped);

    Ok(())
}

#[tokio::test]
async fn test_shutdown_is_forced_after_grace_period() -> Result<()> {
    let grace_period = Duration::from_millis(200);
    let (slow_router, finished) = router_with_slow_route(Duration::from_millis(800));
    let server = HttpServer::with_router(local_config(grace_period)?, slow_router);
    let states = server.subscribe();
    let listener = server.bind().await?;
    let address = listener.local_addr()?;
    let (trigger, shutdown) = oneshot::channel::<()>();
    let running = tokio::spawn(server.serve(listener, async move {
        let _ = shutdown.await;
    }));

    let request = tokio::spawn(send_raw_request(address, "/slow"));
    sleep(Duration::from_millis(100)).await;
    let _ = trigger.send(());

    let result = running.await?;

    assert!(matches!(result, Err(ServerError::ShutdownTimeout(timeout)) if timeout == grace_period));
    assert_eq!(*states.borrow(), ServerState::Stopped);

    // Past the handler's own delay: an aborted request must never complete.
    sleep(Duration::from_millis(1000)).await;

    assert!(!finished.load(Ordering::SeqCst));

    let response = request.await?;

    assert!(!matches!(&response, Ok(body) if body.starts_with("HTTP/1.1 200")), "{response:?}");

    Ok(())
}
