//! Core module containing the link data model, errors and URI templates

pub mod error;
pub mod link;
pub mod media_types;
pub mod template;

pub use error::{ConfigError, ErrorResponse, LinkError, RelMapError, RelMapResult};
pub use link::{GroupAlias, GroupRules, Link, LinkGroup, LinkRef, Params, ResolvedLink};
pub use template::UriTemplate;
