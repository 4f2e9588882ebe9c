//! HTTP interaction module
//!
//! Everything between the resource model and the wire: the transport seam,
//! the client that owns it, and the URL/query algebra applied before a
//! request is issued.
//!
//! # Module Structure
//!
//! - [`client`] - API client: schema URLs, dispatch of responses, CRUD helpers
//! - [`transport`] - `Transport` trait and the reqwest implementation
//! - [`query`] - Filter and parameter encoding into query strings
//! - [`urljoin`] - Relative URL resolution against the API base
//!
//! # Example
//!
//! ```ignore
//! use hypermedia_client::{Client, ClientConfig, ListOptions};
//!
//! async fn example() -> hypermedia_client::Result<()> {
//!     let client = Client::new(&ClientConfig::load().with_env_overrides())?;
//!     let containers = client.list("containers", &ListOptions::default()).await?;
//!     for item in containers.items()? {
//!         println!("{:?}", item.id());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod query;
pub mod transport;
pub mod urljoin;

#[cfg(test)]
pub(crate) mod mock;
