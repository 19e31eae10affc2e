//! catapult-server — HTTP front end for the Athena query pipeline.
//!
//! Exposes the dataset proxy as `POST /query`. Each request runs its own
//! independent resolve -> submit -> poll -> fetch cycle; there is no shared
//! mutable state between requests.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use catapult_engine::AthenaEngine;
use catapult_proxy::{ProxyConfig, QueryProxy};
use catapult_server::app;

/// HTTP proxy for Athena SQL execution.
#[derive(Parser, Debug)]
#[command(name = "catapult-server", version, about)]
struct Cli {
    /// Address to bind the HTTP listener on.
    #[arg(long, env = "CATAPULT_BIND", default_value = "0.0.0.0:8087")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = ProxyConfig::from_env();
    info!(
        database = %config.database,
        output_location = %config.output_location,
        poll_interval_ms = config.poll_interval_ms,
        max_poll_attempts = config.max_poll_attempts,
        "loaded proxy config"
    );

    let engine = AthenaEngine::new(config.region.clone()).await;
    let proxy = Arc::new(QueryProxy::new(engine, config));

    let router = app::router(proxy);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(addr = %cli.bind, "catapult-server listening");
    axum::serve(listener, router).await?;

    Ok(())
}
