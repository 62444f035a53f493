//! # relmap
//!
//! Hypermedia (HATEOAS) links for REST APIs.
//!
//! Links are declared once in a catalog (href template, method, relation,
//! media types) and grouped by the context they belong to. A resource handler
//! asks for the links of its group and embeds them in its response:
//!
//! - **Required / optional links**: always part of the group
//! - **Exclusive links**: only when the group is requested directly
//! - **Mixins**: reuse another group's required and optional links
//! - **Clones**: make a group an alias of another one
//! - **URI templates**: hrefs are expanded with the known params (RFC 6570)
//! - **Documentation**: every group gets an HTML page listing its links
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relmap::prelude::*;
//!
//! let config = LinkDataConfig::from_yaml_str(r#"
//! links:
//!   car:
//!     href: /car/{carId}
//!     rel: car
//! groups:
//!   car:
//!     required: [car]
//! "#)?;
//! let links = Links::from_config(config)?;
//!
//! let params: Params = [("carId".to_string(), "42".to_string())].into();
//! let car_links = links.get_links_with("car", &params)?;
//! assert_eq!(car_links[0].href, "/car/42");
//! assert_eq!(car_links[0].rel, "self");
//! ```

pub mod config;
pub mod core;
pub mod links;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{ConfigError, ErrorResponse, LinkError, RelMapError, RelMapResult},
        link::{GroupAlias, GroupRules, Link, LinkGroup, LinkRef, Params, ResolvedLink},
        media_types,
        template::UriTemplate,
    };

    // === Links ===
    pub use crate::links::{
        AppState, GroupCompiler, LinkCatalog, LinkGroupRegistry, LinkedResponse, Links,
        ROOT_GROUP, RelMapPage, RelMapRenderer, SELF_REL, validate,
    };

    // === Config ===
    pub use crate::config::{AppConfig, Environment, LinkDataConfig};

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        routing::get,
    };
}
