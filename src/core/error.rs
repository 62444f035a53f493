//! Typed error handling for relmap
//!
//! Errors are split by the phase in which they can occur:
//!
//! - [`ConfigError`]: the link catalog or group registry is broken. Raised
//!   once, while building [`Links`](crate::links::Links), which then never
//!   becomes usable.
//! - [`LinkError`]: a compilation request could not be served (unknown group,
//!   unknown link, malformed URI template).
//! - [`RelMapError`]: the umbrella type handed to HTTP handlers, which knows
//!   how to turn itself into a JSON error response.
//!
//! # Example
//!
//! ```rust,ignore
//! match links.get_links("car") {
//!     Ok(links) => println!("{} links", links.len()),
//!     Err(LinkError::UnknownGroup { group_id }) => {
//!         println!("no link group named {}", group_id);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for relmap
#[derive(Debug, Error)]
pub enum RelMapError {
    /// Link compilation errors
    #[error(transparent)]
    Link(#[from] LinkError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The documentation page could not be rendered
    #[error("Failed to render link documentation: {message}")]
    Render { message: String },

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RelMapError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelMapError::Link(e) => e.status_code(),
            RelMapError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelMapError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RelMapError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RelMapError::Link(e) => e.error_code(),
            RelMapError::Config(_) => "CONFIG_ERROR",
            RelMapError::Render { .. } => "RENDER_ERROR",
            RelMapError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RelMapError::Link(LinkError::UnknownGroup { group_id }) => {
                Some(serde_json::json!({ "link_group_id": group_id }))
            }
            RelMapError::Link(LinkError::UnknownLink { link_id }) => {
                Some(serde_json::json!({ "link_id": link_id }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RelMapError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<tera::Error> for RelMapError {
    fn from(err: tera::Error) -> Self {
        // tera hides the interesting part of the message in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        RelMapError::Render { message }
    }
}

// =============================================================================
// Link Errors
// =============================================================================

/// Errors raised while compiling a link group
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// No link group is registered under this id
    #[error("Link group '{group_id}' undefined")]
    UnknownGroup { group_id: String },

    /// No catalog entry is registered under this id
    #[error("Link '{link_id}' is unknown")]
    UnknownLink { link_id: String },

    /// An href could not be parsed as a URI template
    #[error("Invalid URI template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },
}

impl LinkError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LinkError::UnknownGroup { .. } => StatusCode::NOT_FOUND,
            LinkError::UnknownLink { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            LinkError::InvalidTemplate { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LinkError::UnknownGroup { .. } => "UNKNOWN_LINK_GROUP",
            LinkError::UnknownLink { .. } => "UNKNOWN_LINK",
            LinkError::InvalidTemplate { .. } => "INVALID_URI_TEMPLATE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while loading or validating link data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A catalog link is not owned by any link group
    #[error("Missing link group for link '{link_id}'")]
    MissingLinkGroup { link_id: String },

    /// A link group references a link that is not in the catalog
    #[error("Missing link id '{link_id}' referenced by link group '{group_id}'")]
    MissingLinkId { group_id: String, link_id: String },

    /// A link group clones a group that does not exist
    #[error("Link group '{group_id}' clones unknown link group '{target}'")]
    MissingCloneTarget { group_id: String, target: String },

    /// A link group mixes in a group that does not exist
    #[error("Link group '{group_id}' mixes in unknown link group '{mixin}'")]
    MissingMixinGroup { group_id: String, mixin: String },

    /// Clone and mixin references loop back to a group already being compiled
    #[error("Link group '{group_id}' is part of a clone/mixin cycle")]
    CircularGroup { group_id: String },

    /// A catalog href is not a valid URI template
    #[error("Link '{link_id}' has an invalid href: {message}")]
    InvalidTemplate { link_id: String, message: String },

    /// The documentation template could not be compiled
    #[error("Invalid documentation template: {message}")]
    Template { message: String },

    /// Failed to parse a link data file
    #[error("Failed to parse link data{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Link data file not found
    #[error("Link data file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading link data
    #[error("IO error: {message}")]
    IoError { message: String },

    /// Invalid value in the application configuration
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" '{}'", f))
        .unwrap_or_default()
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for relmap operations
pub type RelMapResult<T> = Result<T, RelMapError>;
