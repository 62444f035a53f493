//! API exposure layers
//!
//! Exposures turn a transport-agnostic [`ServerHost`](super::host::ServerHost)
//! into something a transport can serve.

pub mod rest;

pub use rest::RestExposure;
