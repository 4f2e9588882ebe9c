//! API Client
//!
//! Main client for a link/action API, combining the transport with the
//! resource registry. Every [`Resource`] keeps a cheap clone of the client it
//! came from so it can navigate further.

use super::query::{build_complex_query, FilterSpec, QueryParams};
use super::transport::{HttpTransport, Transport};
use super::urljoin::resolve;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::resource::{registry, Collection, Registry, Resource};
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Main API client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    transport: Arc<dyn Transport>,
    registry: Arc<Registry>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// Options for listing a collection
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub filters: FilterSpec,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<u32>,
    pub marker: Option<String>,
    /// Related link names to embed in each item
    pub include: Vec<String>,
}

impl ListOptions {
    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(sort) = &self.sort {
            params.insert("sort".to_string(), Value::String(sort.clone()));
        }
        if let Some(order) = &self.order {
            params.insert("order".to_string(), Value::String(order.clone()));
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), Value::from(limit));
        }
        if let Some(marker) = &self.marker {
            params.insert("marker".to_string(), Value::String(marker.clone()));
        }
        if !self.include.is_empty() {
            params.insert("include".to_string(), Value::String(self.include.join(",")));
        }
        params
    }
}

impl Client {
    /// Create a client talking HTTP to `config.url`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(&config.url, Arc::new(transport))
    }

    /// Create a client over any transport, using the builtin registry
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| Error::invalid_url(base_url, e))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::invalid_url(
                base_url,
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url: base_url.to_string(),
                transport,
                registry: registry::builtin(),
            }),
        })
    }

    /// Replace the registry used to dispatch decoded payloads
    pub fn with_registry(self, registry: Registry) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                base_url: self.inner.base_url.clone(),
                transport: Arc::clone(&self.inner.transport),
                registry: Arc::new(registry),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// URL of the schema collection, or of one schema when `type_name` is given
    pub fn schemas_url(&self, type_name: Option<&str>) -> Result<String> {
        let schemas = resolve(self.base_url(), "schemas")?;
        match type_name {
            Some(type_name) => resolve(&schemas, type_name),
            None => Ok(schemas),
        }
    }

    /// URL of the collection for a resource type
    pub fn collection_url(&self, type_name: &str) -> Result<String> {
        resolve(self.base_url(), type_name)
    }

    /// Issue a raw request through the transport
    pub async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value> {
        Ok(self.inner.transport.request(method, url, body).await?)
    }

    /// Issue a request and dispatch the response to its representation
    pub async fn request_as_resource(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Resource> {
        let value = self.request(method, url, body).await?;
        self.instantiate(value)
    }

    /// Turn a decoded payload into a resource bound to this client
    pub fn instantiate(&self, fields: Value) -> Result<Resource> {
        self.registry().instantiate(fields, self)
    }

    /// List a collection, applying filters, sorting and paging options
    pub async fn list(&self, type_name: &str, options: &ListOptions) -> Result<Collection> {
        let url = build_complex_query(
            &self.collection_url(type_name)?,
            Some(&options.filters),
            Some(&options.to_params()),
        )?;
        let resource = self.request_as_resource(Method::GET, &url, None).await?;
        Collection::try_from(resource)
    }

    /// Fetch one resource by id
    pub async fn by_id(&self, type_name: &str, id: &str) -> Result<Resource> {
        let url = resolve(
            &self.collection_url(type_name)?,
            &urlencoding::encode(id),
        )?;
        self.request_as_resource(Method::GET, &url, None).await
    }

    /// Create a resource in the collection for `type_name`
    pub async fn create(&self, type_name: &str, body: &Value) -> Result<Resource> {
        let url = self.collection_url(type_name)?;
        self.request_as_resource(Method::POST, &url, Some(body)).await
    }

    /// Update `resource` with a partial body
    pub async fn update(&self, resource: &Resource, body: &Value) -> Result<Resource> {
        let url = resource.self_link()?;
        self.request_as_resource(Method::PUT, url, Some(body)).await
    }

    /// Fetch the schema collection
    pub async fn schemas(&self) -> Result<Collection> {
        let url = self.schemas_url(None)?;
        let resource = self.request_as_resource(Method::GET, &url, None).await?;
        Collection::try_from(resource)
    }
}
