//! Server module for building HTTP servers around link groups
//!
//! This module provides a `ServerBuilder` that registers:
//! - the API root route with the `root` group's links
//! - the link documentation pages
//! - health check routes

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
