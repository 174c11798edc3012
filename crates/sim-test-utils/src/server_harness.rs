//! Test server harness for black-box HTTP tests.

use std::net::SocketAddr;
use std::sync::Arc;

use sim_service::config::Config;
use sim_service::observability::testing::RecordingBackend;
use sim_service::routes::{self, AppState};
use sim_service::services::pacing::NoDelay;
use tokio::task::JoinHandle;

/// Spawns the real router on `127.0.0.1:0`, wired to a [`RecordingBackend`]
/// and the no-op delay source so tests are deterministic and fast.
pub struct TestServer {
    addr: SocketAddr,
    /// Ordered record of every metric emission the server produced.
    pub metrics: Arc<RecordingBackend>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a new test server instance.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let config = Config {
            service_name: "sim-service-test".to_string(),
            environment: "test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            otlp_endpoint: None,
            export_interval_secs: 10,
        };

        let metrics = Arc::new(RecordingBackend::new());
        let state = Arc::new(AppState::new(config, metrics.clone(), Arc::new(NoDelay)));

        let app = routes::build_routes(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server error: {e}");
            }
        });

        Ok(Self {
            addr,
            metrics,
            _handle: handle,
        })
    }

    /// Base URL of the running server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}
