//! HTTP server startup logic.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::{AppConfig, SHUTDOWN_GRACE_SECS};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("Failed to bind server: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind the configured address and serve until a shutdown signal arrives.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr_str = config.http.bind_addr();
    let addr: SocketAddr = addr_str
        .parse()
        .map_err(|source| ServerError::Address {
            addr: addr_str.clone(),
            source,
        })?;

    let listener = TcpListener::bind(addr).await.map_err(ServerError::Bind)?;
    let local = listener.local_addr().map_err(ServerError::Bind)?;
    tracing::info!(addr = %local, "App running on port {}", local.port());

    serve_until(
        listener,
        app,
        shutdown::shutdown_signal(),
        Duration::from_secs(SHUTDOWN_GRACE_SECS),
    )
    .await
}

/// Serve `app` on an already-bound listener until `signal` resolves.
///
/// After the signal, new connections are refused and in-flight requests get
/// up to `grace` to finish before the server returns anyway.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    let deadline = async move {
        if signalled_rx.await.is_err() {
            // Server finished without a signal
            std::future::pending::<()>().await;
        }
        tracing::info!(
            grace_secs = grace.as_secs(),
            "Graceful shutdown initiated, waiting for connections to close"
        );
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(ServerError::Serve)?;
            tracing::info!("Server stopped");
        }
        _ = deadline => {
            tracing::warn!("Grace period elapsed with connections still open, stopping");
        }
    }

    Ok(())
}
