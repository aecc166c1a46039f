//! HTTP server lifecycle: bind, spawn the axum server in a background
//! task, and hand back a handle with a shutdown channel.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Session metadata for a running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running server.
pub struct IntakeServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl IntakeServer {
    /// Ask the server to stop accepting connections and drain.
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Server task ended abnormally: {e}");
        }
    }
}

/// Bind `addr` and start serving the API router.
///
/// Port 0 binds an ephemeral port; the chosen port is in the session.
pub async fn start_server(ctx: ApiContext, addr: SocketAddr) -> Result<IntakeServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = api_router(ctx);

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Server received shutdown signal");
        };

        tracing::info!(%addr, "Server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Server error: {e}");
        }

        tracing::info!("Server stopped");
    });

    Ok(IntakeServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    use crate::store::MemoryPatientStore;

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    async fn start_test_server() -> (IntakeServer, Arc<MemoryPatientStore>) {
        let store = Arc::new(MemoryPatientStore::new());
        let server = start_server(ApiContext::new(store.clone()), localhost())
            .await
            .expect("server should start");
        (server, store)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (mut server, _) = start_test_server().await;

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);
        assert!(server.session.server_addr.contains(':'));

        let url = format!("http://127.0.0.1:{}/", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        server.join().await;
    }

    #[tokio::test]
    async fn server_saves_patients_over_http() {
        let (mut server, store) = start_test_server().await;
        let port = server.session.port;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/patients"))
            .header("Content-Type", "application/json")
            .body(r#"{"personalInfo":{"name":"Jane Doe"}}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["data"]["insertedId"], store.records()[0].id.as_str());

        server.shutdown();
        server.join().await;
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let (mut server, _) = start_test_server().await;
        let url = format!("http://127.0.0.1:{}/nonexistent", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (mut server, _) = start_test_server().await;
        server.shutdown();
        server.shutdown(); // Second call should be safe
        server.join().await;
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let (mut first, _) = start_test_server().await;
        let taken = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), first.session.port);

        let err = start_server(ApiContext::new(Arc::new(MemoryPatientStore::new())), taken)
            .await
            .err()
            .expect("second bind should fail");
        assert!(err.contains("Failed to bind"));

        first.shutdown();
    }
}
