//! Configuration loading and management
//!
//! Two kinds of configuration live here:
//!
//! - [`LinkDataConfig`]: the link catalog and the link groups, usually kept in
//!   a YAML file next to the service.
//! - [`AppConfig`]: process settings read from the environment by the server
//!   binary.

use crate::core::error::ConfigError;
use crate::core::link::{GroupRules, Link, LinkGroup};
use crate::core::media_types;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Link catalog and link group definitions
///
/// ```yaml
/// links:
///   car:
///     href: /car/{carId}
///     rel: car
///     method: GET
/// groups:
///   car:
///     required: [car]
///     params:
///       carId: "<carId>"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkDataConfig {
    /// Link id -> link metadata
    #[serde(default)]
    pub links: IndexMap<String, Link>,

    /// Group id -> composition rules
    #[serde(default)]
    pub groups: IndexMap<String, LinkGroup>,
}

impl LinkDataConfig {
    /// Load link data from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::from(e),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load link data from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The links every service starts with: its root, its UI and the link
    /// documentation pages
    pub fn default_config() -> Self {
        let mut links = IndexMap::new();
        links.insert(
            "root".to_string(),
            Link::new("/", "root")
                .with_description("Root")
                .with_returns(media_types::empty()),
        );
        links.insert(
            "ui".to_string(),
            Link::new("/ui", "ui")
                .with_description("View UI for service")
                .with_returns(media_types::html()),
        );
        links.insert(
            "relMap".to_string(),
            Link::new("/relMap", "rel-map")
                .with_description("View link documentation")
                .with_returns(media_types::html()),
        );

        let mut groups = IndexMap::new();
        groups.insert("ui".to_string(), GroupRules::new().into());
        groups.insert("relMap".to_string(), GroupRules::new().into());
        groups.insert(
            "root".to_string(),
            GroupRules::new().exclusive(["root", "ui", "relMap"]).into(),
        );

        Self { links, groups }
    }
}

/// Deployment environment, as set by `APP_ENV`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Production,
    Other(String),
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value {
            "production" => Environment::Production,
            other => Environment::Other(other.to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Process settings for the relmap server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub env: Environment,
    pub port: u16,
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Route prefix of the link documentation pages
    pub doc_root: String,
    /// YAML link data; the built-in data is used when absent
    pub link_data_path: Option<String>,
}

impl AppConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::parse(&lookup("APP_ENV").unwrap_or_else(|| "production".to_string()));

        let port = match lookup("APP_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                field: "APP_PORT".to_string(),
                value: value.clone(),
                message: "expected a port number".to_string(),
            })?,
            None => 80,
        };

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| {
            if env.is_production() {
                "info".to_string()
            } else {
                "debug".to_string()
            }
        });

        let doc_root = normalize_doc_root(&lookup("DOC_ROOT").unwrap_or_else(|| "/relMap".to_string()))?;

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "relmap".to_string()),
            env,
            port,
            log_level,
            doc_root,
            link_data_path: lookup("LINK_DATA_PATH").filter(|p| !p.is_empty()),
        })
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Link data from `link_data_path`, or the built-in defaults
    pub fn load_link_data(&self) -> Result<LinkDataConfig, ConfigError> {
        match &self.link_data_path {
            Some(path) => LinkDataConfig::from_yaml_file(path),
            None => Ok(LinkDataConfig::default_config()),
        }
    }
}

/// Check that a documentation prefix is an absolute path below the API root,
/// without its trailing slash
pub fn normalize_doc_root(doc_root: &str) -> Result<String, ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        field: "doc_root".to_string(),
        value: doc_root.to_string(),
        message: message.to_string(),
    };

    if !doc_root.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    let trimmed = doc_root.trim_end_matches('/');
    if trimmed.is_empty() {
        // GET / already serves the API root
        return Err(invalid("must not be '/'"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LinkDataConfig::default_config();

        assert_eq!(config.links.len(), 3);
        assert_eq!(config.groups.len(), 3);
        assert_eq!(config.links["relMap"].rel, "rel-map");
    }

    #[test]
    fn test_yaml_serialization() {
        let config = LinkDataConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = LinkDataConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file() {
        let err = LinkDataConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.app_name, "relmap");
        assert!(config.env.is_production());
        assert_eq!(config.port, 80);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.doc_root, "/relMap");
        assert!(config.link_data_path.is_none());
    }

    #[test]
    fn test_app_config_development() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_ENV", "development"),
            ("APP_PORT", "3000"),
            ("DOC_ROOT", "/docs/"),
        ]))
        .unwrap();

        assert_eq!(config.env, Environment::Other("development".to_string()));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.doc_root, "/docs");
    }

    #[test]
    fn test_app_config_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[("APP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_normalize_doc_root() {
        assert_eq!(normalize_doc_root("/relMap").unwrap(), "/relMap");
        assert_eq!(normalize_doc_root("/docs/links/").unwrap(), "/docs/links");
        assert!(normalize_doc_root("/").is_err());
        assert!(normalize_doc_root("relMap").is_err());
    }
}
