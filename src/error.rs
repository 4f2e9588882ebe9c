//! Error types
//!
//! Every failure the resource model can raise on its own. Transport failures
//! are carried through untouched in [`Error::Transport`].

use thiserror::Error;

/// Errors raised by the resource model, URL algebra and query builder.
#[derive(Debug, Error)]
pub enum Error {
    /// A resource was constructed without one of its required parts.
    #[error("Missing required input: {0}")]
    MissingRequiredInput(&'static str),

    /// Navigation by a link name the resource does not carry.
    #[error("Unknown link '{name}', valid links: [{}]", .valid.join(", "))]
    UnknownLink { name: String, valid: Vec<String> },

    /// Navigation by an action name the resource does not carry.
    #[error("Unknown action '{name}', valid actions: [{}]", .valid.join(", "))]
    UnknownAction { name: String, valid: Vec<String> },

    /// A URL string could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A filter or parameter value with no query string form.
    #[error("Invalid query value for '{key}': {value}")]
    InvalidQueryValue { key: String, value: String },

    /// A resource was narrowed to a representation it was not dispatched as.
    #[error("Expected a {expected} representation, found {found}")]
    NotA {
        expected: &'static str,
        found: &'static str,
    },

    /// JSON text that could not be decoded.
    #[error("Failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure reported by the transport collaborator.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn invalid_url(url: &str, source: url::ParseError) -> Self {
        Error::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
