//! Resource abstraction layer
//!
//! Decoded payloads are turned into navigable resources without the client
//! knowing every type the server may return. A payload's `type` field selects
//! one of a closed set of representations through the [`Registry`]; anything
//! unregistered becomes a plain [`Resource`].
//!
//! # Architecture
//!
//! - [`registry`] - Type identifier to representation table and the dispatch point
//! - [`model`] - Base resource: fields, links, actions, navigation
//! - [`collection`] - Paged lists whose `data` embeds further resources
//! - [`schema`] - Per-type metadata (fields, allowed methods, actions)
//!
//! # Example
//!
//! ```ignore
//! use hypermedia_client::Client;
//!
//! async fn stop_all(client: &Client) -> hypermedia_client::Result<()> {
//!     let containers = client.list("containers", &Default::default()).await?;
//!     for container in containers.all_items().await? {
//!         container.do_action("stop", None).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod collection;
pub mod model;
pub mod registry;
pub mod schema;

pub use collection::Collection;
pub use model::{Resource, ResourceBuilder};
pub use registry::{Registry, ResourceKind};
pub use schema::Schema;
