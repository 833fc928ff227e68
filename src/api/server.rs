//! Portal server lifecycle: bind, spawn the axum server in a background
//! task, and hand back a handle with a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::portal_router;
use crate::core_state::CoreState;

/// Handle to a running portal server.
pub struct PortalServer {
    pub addr: SocketAddr,
    pub started_at: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PortalServer {
    /// Ask the server to stop accepting connections. In-flight requests finish.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Portal server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Portal server task failed: {e}");
        }
    }
}

/// Bind `addr` and serve the portal router in a background task.
///
/// Port 0 picks an ephemeral port; the bound address is on the handle.
pub async fn start_server_on(
    core: Arc<CoreState>,
    addr: SocketAddr,
) -> Result<PortalServer, std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let app = portal_router(core);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Portal server received shutdown signal");
        };

        tracing::info!(%addr, "Portal server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Portal server error: {e}");
        }

        tracing::info!("Portal server stopped");
    });

    Ok(PortalServer {
        addr,
        started_at: chrono::Utc::now().to_rfc3339(),
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
