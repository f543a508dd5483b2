//! Gramgate server binary.
//!
//! Startup is strictly ordered: configuration, then the session bootstrap
//! against the client backend, then the listener. A failure anywhere in
//! that chain exits non-zero without ever accepting traffic.
//!
//! The binary wires the in-process demo backend; production deployments
//! substitute an automation client implementing the same `DirectApi` seam.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use gramgate_client::{DemoClient, share};
use gramgate_server::{
    bootstrap, create_app,
    infra::{app_state::AppState, config::Config},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "gramgate-server")]
#[command(about = "HTTP gateway exposing a shared direct-messaging client")]
struct Cli {
    /// Listener host
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Listener port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 5000)]
    port: u16,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_file_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();
    init_tracing();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let config = Arc::new(
        Config::from_env(cli.host, cli.port)
            .context("failed to load configuration")?,
    );
    std::fs::create_dir_all(&config.sessions_dir).with_context(|| {
        format!(
            "failed to create sessions directory {}",
            config.sessions_dir.display()
        )
    })?;

    let client = share(DemoClient::new());
    let state = AppState::new(client.clone(), Arc::clone(&config));

    let artifact = bootstrap::establish_session(&client, &config)
        .await
        .context("failed to establish authenticated session")?;
    info!(artifact = %artifact.display(), "session artifact persisted");

    let app = create_app(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| {
            format!("invalid listen address {}:{}", config.host, config.port)
        })?;

    info!("starting Gramgate server on {addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}
