//! Client model for link/action hypermedia REST APIs.
//!
//! Every response is a JSON object carrying data fields plus `links` (named
//! URLs to related views) and `actions` (named URLs that trigger operations).
//! Responses are dispatched on their `type` field to a [`Resource`],
//! [`Collection`] or [`Schema`], which can then be navigated without the
//! client knowing the server's resource types in advance.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod resource;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::client::{Client, ListOptions};
pub use http::query::{append_filters, build_complex_query, Condition, Filter, FilterSpec, QueryParams};
pub use http::transport::{HttpTransport, Transport};
pub use http::urljoin::resolve;
pub use resource::{Collection, Registry, Resource, ResourceBuilder, ResourceKind, Schema};
