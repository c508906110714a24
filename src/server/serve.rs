//! Server startup and shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use super::routes::{AppState, build_router};
use crate::db::Database;

/// Handle for a running server.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:5000`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Signal graceful shutdown and wait for in-flight requests to finish.
    ///
    /// Once this returns, the router (and its database handles) has been dropped.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            tracing::error!("Server task failed: {}", e);
        }
    }
}

/// Bind `addr` and serve the task API in a background task.
///
/// Binding failures are returned to the caller; port 0 picks a free port.
pub async fn start_server(db: Arc<Database>, addr: SocketAddr) -> anyhow::Result<ServerHandle> {
    let app = build_router(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Task service listening on http://{}", bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Task service shutting down");
            })
            .await
        {
            tracing::error!("Task service error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr: bound_addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
