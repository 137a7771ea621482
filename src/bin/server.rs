//! FrameKV Server Binary
//!
//! Starts the TCP server backed by an in-memory store.

use std::sync::Arc;

use clap::Parser;
use framekv::{Config, MemStore, Server};
use tracing_subscriber::{fmt, EnvFilter};

/// FrameKV Server
#[derive(Parser, Debug)]
#[command(name = "framekv-server")]
#[command(about = "Minimal TCP key-value server")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "0.0.0.0:8999")]
    listen: String,

    /// Read timeout per connection in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout per connection in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,framekv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("FrameKV Server v{}", framekv::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    let config = Config::builder()
        .listen_addr(&args.listen)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    let server = match Server::with_store(config, Arc::new(MemStore::new())) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    let server = Arc::new(server);

    // Set up Ctrl+C handler
    let signalled = Arc::clone(&server);
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("Received Ctrl+C, initiating shutdown...");
        signalled.shutdown();
    }) {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
