//! Error types for cloud providers
//!
//! This module defines all error types surfaced by providers and the registry.

use thiserror::Error;

/// Result type alias for cloud provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cloud providers
///
/// Every error is scoped to the single call that produced it. Nothing here
/// is fatal to the process and nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// No configuration source was supplied, or it was empty
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// The configuration source could not be parsed into the expected shape
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    /// Connection failure or non-success HTTP status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body is not valid JSON, or not of the expected top-level shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The query matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The query matched more than one record where exactly one was expected
    #[error("Ambiguous match: {count} records named {name}")]
    AmbiguousMatch {
        /// Name that was looked up
        name: String,
        /// Number of records returned
        count: usize,
    },

    /// An expected field is missing or holds an invalid value
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No factory is registered under the requested name
    #[error("Unknown cloud provider: {0}")]
    UnknownProvider(String),

    /// A factory is already registered under this name
    #[error("Cloud provider already registered: {0}")]
    DuplicateProvider(String),

    /// The provider does not offer the requested capability
    #[error("Not supported: {0}")]
    Unsupported(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a missing configuration error
    pub fn missing_configuration(msg: impl Into<String>) -> Self {
        Self::MissingConfiguration(msg.into())
    }

    /// Create a configuration parse error
    pub fn config_parse(msg: impl Into<String>) -> Self {
        Self::ConfigParse(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an ambiguous match error
    pub fn ambiguous(name: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousMatch {
            name: name.into(),
            count,
        }
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an unsupported capability error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
