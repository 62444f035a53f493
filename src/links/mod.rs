//! Link management module
//!
//! Link catalog and group registry, their validation, group compilation and
//! the HTTP handlers and documentation pages built on top of them.

pub mod catalog;
pub mod compiler;
pub mod docs;
pub mod handlers;
pub mod registry;
pub mod service;
pub mod validator;

pub use catalog::LinkCatalog;
pub use compiler::{GroupCompiler, SELF_REL};
pub use docs::{RelMapPage, RelMapRenderer};
pub use handlers::{AppState, LinkedResponse, api_root, relmap_group, relmap_index};
pub use registry::LinkGroupRegistry;
pub use service::{Links, ROOT_GROUP};
pub use validator::validate;
