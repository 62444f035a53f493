//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.

use super::super::host::ServerHost;
use crate::links::handlers::AppState;
use crate::server::router::{build_api_routes, mount_doc_routes};
use anyhow::Result;
use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - The API root route
    /// - Custom routes
    /// - Link documentation routes below the documentation root
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let state = AppState {
            links: host.links.clone(),
            doc_root: host.doc_root.clone(),
        };

        let mut app = Self::health_routes(host.app_name.clone()).merge(build_api_routes(state.clone()));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(mount_doc_routes(app, &host.doc_root, state))
    }

    /// Build health check routes
    fn health_routes(app_name: String) -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
            .with_state(Arc::new(app_name))
    }

    /// Health check endpoint handler
    async fn health_check(State(app_name): State<Arc<String>>) -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": app_name.as_str()
        }))
    }
}
