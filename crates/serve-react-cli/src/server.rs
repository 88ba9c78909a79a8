//! Development server.
//!
//! Serves compiled artifacts from the in-memory output store and everything
//! else from the serving directory on disk. The store is consulted first so
//! `/bundle.js` always reflects the compile pass, even if a stale file with
//! the same name exists on disk.

use crate::error::{CliError, Result};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Router,
};
use serve_react_bundler::MemoryOutput;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Shared handle to the compiled artifacts.
pub type SharedOutput = Arc<MemoryOutput>;

/// Development server.
pub struct DevServer {
    /// Static file root on disk.
    serving_dir: PathBuf,
    /// Address to bind.
    addr: SocketAddr,
    /// Compiled artifacts written by the compile pass.
    output: SharedOutput,
}

impl DevServer {
    /// Create a new dev server bound to `127.0.0.1:<port>`.
    pub fn new(serving_dir: impl Into<PathBuf>, port: u16, output: SharedOutput) -> Self {
        Self {
            serving_dir: serving_dir.into(),
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
            output,
        }
    }

    /// Address the server will bind.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start serving. Binds the listener, then serves until the process is
    /// terminated; there is no shutdown sequence beyond that.
    pub async fn start(self) -> Result<()> {
        let addr = self.addr;
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::debug!(%addr, "listener bound");
        crate::ui::success(&format!("Dev server running at http://{}", addr));

        axum::serve(listener, app)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Build the axum router: in-memory artifacts first, then static files
    /// from disk, with permissive CORS for local development.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback_service(ServeDir::new(&self.serving_dir))
            .layer(axum::middleware::from_fn_with_state(
                Arc::clone(&self.output),
                serve_from_memory,
            ))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
    }
}

/// Serve a request from the in-memory store when it holds the path,
/// otherwise pass through to the static file service.
async fn serve_from_memory(
    State(output): State<SharedOutput>,
    request: Request,
    next: Next,
) -> Response {
    if let Some((content, content_type)) = output.get(request.uri().path()) {
        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "no-cache")
            .body(Body::from(content))
            .unwrap()
            .into_response();
    }

    next.run(request).await
}
