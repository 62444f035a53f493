//! Server host for transport-agnostic API exposure
//!
//! The host holds the validated link data and the settings every exposure
//! needs. It is the single source of truth for the application state.

use crate::config::normalize_doc_root;
use crate::links::Links;
use anyhow::Result;

/// Host context shared by the REST exposure and its handlers
#[derive(Debug, Clone)]
pub struct ServerHost {
    /// Validated link catalog and groups
    pub links: Links,

    /// Route prefix of the link documentation pages
    pub doc_root: String,

    /// Service name reported by the health check
    pub app_name: String,
}

impl ServerHost {
    /// Build a host, checking the documentation prefix
    pub fn new(links: Links, doc_root: &str, app_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            links,
            doc_root: normalize_doc_root(doc_root)?,
            app_name: app_name.into(),
        })
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
    fn test_host_normalizes_doc_root() {
        let host = ServerHost::new(links(), "/relMap/", "relmap").unwrap();
        assert_eq!(host.doc_root, "/relMap");
    }

    #[test]
    fn test_host_rejects_relative_doc_root() {
        assert!(ServerHost::new(links(), "relMap", "relmap").is_err());
    }
}
