//! HTTP handlers exposing link groups
//!
//! - the API root, returning the `root` group's links next to empty data
//! - the link documentation pages, one per group

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::core::error::RelMapResult;
use crate::core::link::ResolvedLink;
use crate::core::media_types;
use crate::links::service::{Links, ROOT_GROUP};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub links: Links,
    /// Route prefix of the documentation pages
    pub doc_root: String,
}

/// Body of a hypermedia API response
#[derive(Debug, Serialize)]
pub struct LinkedResponse<T: Serialize> {
    pub data: T,
    pub links: Vec<ResolvedLink>,
}

/// GET / - API root: no data, the links of the `root` group
pub async fn api_root(State(state): State<AppState>) -> RelMapResult<Response> {
    let links = state.links.get_links(ROOT_GROUP)?;
    let body = LinkedResponse {
        data: json!({}),
        links,
    };

    let content_type = media_types::empty().swap_remove(0);
    Ok(([(header::CONTENT_TYPE, content_type)], Json(body)).into_response())
}

/// GET {doc_root}/ - documentation of the `root` group
pub async fn relmap_index(State(state): State<AppState>) -> RelMapResult<Html<String>> {
    display_links(&state, ROOT_GROUP)
}

/// GET {doc_root}/{link_group_id} - documentation of one group
pub async fn relmap_group(
    State(state): State<AppState>,
    Path(link_group_id): Path<String>,
) -> RelMapResult<Html<String>> {
    display_links(&state, &link_group_id)
}

fn display_links(state: &AppState, link_group_id: &str) -> RelMapResult<Html<String>> {
    tracing::debug!(link_group_id = %link_group_id, "Rendering link documentation");
    let html = state
        .links
        .render_documentation(link_group_id, &state.doc_root)?;
    Ok(Html(html))
}
