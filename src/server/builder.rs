//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::links::Links;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Default route prefix of the link documentation pages
pub const DEFAULT_DOC_ROOT: &str = "/relMap";

/// Builder for creating HTTP servers that serve hypermedia links
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_links(Links::from_config(LinkDataConfig::default_config())?)
///     .with_doc_root("/relMap")
///     .build()?;
/// ```
pub struct ServerBuilder {
    links: Option<Links>,
    doc_root: String,
    app_name: String,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            links: None,
            doc_root: DEFAULT_DOC_ROOT.to_string(),
            app_name: env!("CARGO_PKG_NAME").to_string(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the link data (required)
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }

    /// Set the route prefix of the link documentation pages
    pub fn with_doc_root(mut self, doc_root: impl Into<String>) -> Self {
        self.doc_root = doc_root.into();
        self
    }

    /// Set the service name reported by the health check
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Add custom routes to the server
    ///
    /// Resource handlers live here; they embed links with
    /// [`Links::get_links_with`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let car_routes = Router::new()
    ///     .route("/car/{car_id}", get(get_car))
    ///     .with_state(links.clone());
    ///
    /// ServerBuilder::new()
    ///     .with_links(links)
    ///     .with_custom_routes(car_routes)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let links = self
            .links
            .take()
            .ok_or_else(|| anyhow::anyhow!("Links are required. Call .with_links()"))?;

        ServerHost::new(links, &self.doc_root, self.app_name.clone())
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        let app = RestExposure::build_router(host, custom_routes)?;
        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_links(links)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkDataConfig;

    fn links() -> Links {
        Links::from_config(LinkDataConfig::default_config()).unwrap()
    }

    #[test]
    fn test_build_without_links_fails() {
        let result = ServerBuilder::new().build();
        let err = result.err().expect("build should fail without links");
        assert!(err.to_string().contains("with_links"));
    }

    #[test]
    fn test_build_with_links() {
        assert!(ServerBuilder::new().with_links(links()).build().is_ok());
    }

    #[test]
    fn test_build_with_trailing_slash_doc_root() {
        let result = ServerBuilder::new()
            .with_links(links())
            .with_doc_root("/docs/")
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_rejects_relative_doc_root() {
        let result = ServerBuilder::new()
            .with_links(links())
            .with_doc_root("docs")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_fluent_chaining_full_pipeline() {
        let result = ServerBuilder::new()
            .with_links(links())
            .with_app_name("cars-api")
            .with_custom_routes(Router::new())
            .build();
        assert!(result.is_ok(), "full fluent pipeline should succeed");
    }
}
