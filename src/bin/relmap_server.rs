//! relmap-server: serves the API root and the link documentation pages
//!
//! Settings come from the environment (`APP_NAME`, `APP_ENV`, `APP_PORT`,
//! `RUST_LOG`, `DOC_ROOT`, `LINK_DATA_PATH`).

use anyhow::{Context, Result};
use relmap::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let link_data = config
        .load_link_data()
        .context("Failed to load link data")?;
    let links = Links::from_config(link_data).context("Invalid link data")?;

    tracing::info!(
        app_name = %config.app_name,
        env = ?config.env,
        doc_root = %config.doc_root,
        "Starting relmap server"
    );

    ServerBuilder::new()
        .with_links(links)
        .with_app_name(config.app_name.clone())
        .with_doc_root(config.doc_root.clone())
        .serve(&config.bind_addr())
        .await
}
