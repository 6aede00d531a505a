use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod handlers;
mod http;

use crate::config::ServerConfig;

/// Entry point for the fixture server
fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "old_page_fixture=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    let addr = config.bind_address()?;

    let listener =
        TcpListener::bind(addr).with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    http::server::serve(
        listener,
        Arc::new(http::routes::Router::new()),
        config.read_timeout(),
    );

    Ok(())
}
