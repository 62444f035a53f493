//! Router builder utilities for link routes

use crate::links::handlers::{AppState, api_root, relmap_group, relmap_index};
use axum::{Router, routing::get};

/// Build the link documentation routes, relative to the documentation root
///
/// - GET / - documentation of the `root` group
/// - GET /{link_group_id} - documentation of any group
pub fn build_doc_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(relmap_index))
        .route("/{link_group_id}", get(relmap_group))
        .with_state(state)
}

/// Build the API root route
///
/// - GET / - empty data with the `root` group's links
pub fn build_api_routes(state: AppState) -> Router {
    Router::new().route("/", get(api_root)).with_state(state)
}

/// Mount the documentation routes below `doc_root` next to `app`
///
/// `doc_root` must be normalized: absolute, no trailing slash, not `/`. The
/// `root` group is served at both `{doc_root}` and `{doc_root}/`.
pub fn mount_doc_routes(app: Router, doc_root: &str, state: AppState) -> Router {
    let index = Router::new()
        .route(&format!("{}/", doc_root), get(relmap_index))
        .with_state(state.clone());

    app.nest(doc_root, build_doc_routes(state)).merge(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkDataConfig;
    use crate::links::Links;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState {
            links: Links::from_config(LinkDataConfig::default_config()).unwrap(),
            doc_root: "/relMap".to_string(),
        }
    }

    async fn status(app: Router, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_doc_routes_are_nested() {
        let app = mount_doc_routes(Router::new(), "/relMap", state());

        assert_eq!(status(app.clone(), "/relMap").await, StatusCode::OK);
        assert_eq!(status(app.clone(), "/relMap/").await, StatusCode::OK);
        assert_eq!(status(app.clone(), "/relMap/ui").await, StatusCode::OK);
        assert_eq!(status(app, "/ui").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_root_route() {
        let app = build_api_routes(state());
        assert_eq!(status(app, "/").await, StatusCode::OK);
    }
}
