use std::io::stderr;

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use transaction_service::server::{shutdown_signal, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 {
        eprintln!("Usage: transaction-service [log_level:optional]");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        std::process::exit(1);
    }

    let log_level = args.get(1)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    //NOTE: A bind failure is returned from main, which exits non-zero with the diagnostic on stderr
    let server = HttpServer::new(ServerConfig::default());
    server.run(shutdown_signal()).await?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
