//! memberstream HTTP server
//!
//! Accepts member mutations over HTTP and records each one as an event on
//! either a Kinesis data stream or a Firehose delivery stream:
//! 1. `POST /members/` emits `add_member`
//! 2. `PUT /members/{id}` emits `update_member`
//! 3. `DELETE /members/{id}` emits `delete_member`
//!
//! Usage:
//!   memberstream --port 8000
//!
//! Backend selection and AWS credentials come from the environment (or a
//! `.env` file in the working directory). See `StreamConfig::from_env`.

use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use memberstream_server::{build_router, AppState};
use memberstream_stream::{connect, Dispatcher, StreamConfig};
use memberstream_types::EnvelopeBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "memberstream")]
#[command(about = "Member API that emits mutation events to Kinesis or Firehose")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP port
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env win over anything inherited from the shell.
    let env_file = dotenvy::dotenv_override().ok();

    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .init();

    info!("memberstream starting...");
    if let Some(path) = env_file {
        info!("Loaded environment from {}", path.display());
    }

    let config = StreamConfig::from_env().context("Failed to read stream configuration")?;
    let sink = connect(&config)
        .await
        .context("Failed to create stream client")?;
    let dispatcher = Arc::new(Dispatcher::new(
        sink,
        EnvelopeBuilder::new(config.delete_timestamp),
    ));
    info!(
        "Emitting to {} stream {:?} (delete timestamps: {:?})",
        config.mode, config.stream_name, config.delete_timestamp
    );

    let app = build_router(AppState::new(dispatcher, config.region.clone()));
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("memberstream stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
