//! Showcase Server - HTTP front end for the feature demos
//!
//! - `config`: TOML file plus command line overrides
//! - `routes`: axum router, every feature group under two names
//! - `handlers`: one thin adapter per component operation
//! - `telemetry`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use showcase_server::{serve, ServerConfig};
//!
//! # async fn example() -> Result<(), showcase_server::ServerError> {
//! serve(ServerConfig::new().with_bind("127.0.0.1:8080")).await
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::{LogFormat, ServerConfig};
pub use error::{ApiError, ServerError};
pub use routes::{app, router};
pub use state::AppState;

use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bind the configured address and serve until Ctrl-C
///
/// # Errors
/// - `ServerError::InvalidBind` if the address does not parse
/// - `ServerError::Io` if binding or serving fails
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = config
        .bind
        .parse()
        .map_err(|_| ServerError::InvalidBind(config.bind.clone()))?;
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, config).await
}

/// Serve on an already bound listener
///
/// # Errors
/// - `ServerError::Io` if serving fails
pub async fn serve_on(listener: TcpListener, config: ServerConfig) -> Result<(), ServerError> {
    let local = listener.local_addr()?;
    tracing::info!(%local, prefix = %config.normalized_prefix(), "starting HTTP server");

    axum::serve(listener, app(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
