//! Gateway server lifecycle.

use std::sync::Arc;

use tracing::info;

use crate::error::GatewayError;
use crate::routes;
use crate::state::AppState;
use crate::Result;

/// The HTTP gateway server.
pub struct GatewayServer {
    host: String,
    port: u16,
    state: Arc<AppState>,
}

impl GatewayServer {
    pub fn new(host: impl Into<String>, port: u16, state: AppState) -> Self {
        Self {
            host: host.into(),
            port,
            state: Arc::new(state),
        }
    }

    /// The address the server will bind to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Run the server until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let addr = self.bind_addr();
        let app = routes::router(self.state);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(GatewayError::Io)?;

        info!("Gateway listening on http://{}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        Ok(())
    }
}
