//! Resource representation
//!
//! A [`Resource`] is the field map of one server payload plus the client it
//! was fetched with. `links` and `actions` are read straight out of the field
//! map, so mutating those fields changes where navigation goes.

use super::collection;
use super::registry::ResourceKind;
use crate::error::{Error, Result};
use crate::http::client::Client;
use crate::http::urljoin::resolve;
use reqwest::Method;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One server-side entity
#[derive(Debug, Clone)]
pub struct Resource {
    fields: Map<String, Value>,
    client: Client,
    kind: ResourceKind,
}

/// Builder for resources assembled outside of a response
#[derive(Debug, Default)]
pub struct ResourceBuilder {
    fields: Option<Value>,
    client: Option<Client>,
}

impl ResourceBuilder {
    pub fn fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Dispatch through the client's registry
    pub fn build(self) -> Result<Resource> {
        let client = self.client.ok_or(Error::MissingRequiredInput("client"))?;
        let fields = self.fields.ok_or(Error::MissingRequiredInput("fields"))?;
        client.instantiate(fields)
    }
}

fn names(map: Option<&Map<String, Value>>) -> Vec<String> {
    map.map(|m| m.keys().cloned().collect()).unwrap_or_default()
}

impl Resource {
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::default()
    }

    pub(crate) fn from_parts(fields: Map<String, Value>, client: Client, kind: ResourceKind) -> Self {
        Self {
            fields,
            client,
            kind,
        }
    }

    /// Decode JSON text and dispatch it through the client's registry
    pub fn from_json(text: &str, client: &Client) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        client.instantiate(value)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Store `value` under `name` and return the stored value
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &Value {
        let slot = self.fields.entry(name.to_string()).or_insert(Value::Null);
        *slot = value.into();
        slot
    }

    pub fn links(&self) -> Option<&Map<String, Value>> {
        self.fields.get("links").and_then(Value::as_object)
    }

    pub fn actions(&self) -> Option<&Map<String, Value>> {
        self.fields.get("actions").and_then(Value::as_object)
    }

    pub fn link(&self, name: &str) -> Option<&str> {
        self.links()?.get(name)?.as_str()
    }

    pub fn action(&self, name: &str) -> Option<&str> {
        self.actions()?.get(name)?.as_str()
    }

    pub fn link_names(&self) -> Vec<String> {
        names(self.links())
    }

    pub fn action_names(&self) -> Vec<String> {
        names(self.actions())
    }

    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    pub fn type_name(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// Schema URL of this resource's type, resolved against its `schemas`
    /// link (or the client's schema collection when the link is absent)
    pub fn qualified_type_name(&self) -> Result<Option<String>> {
        let Some(type_name) = self.type_name() else {
            return Ok(None);
        };
        let schemas = match self.link("schemas") {
            Some(url) => url.to_string(),
            None => self.client.schemas_url(None)?,
        };
        resolve(&schemas, type_name).map(Some)
    }

    pub(crate) fn self_link(&self) -> Result<&str> {
        self.link("self").ok_or_else(|| Error::UnknownLink {
            name: "self".to_string(),
            valid: self.link_names(),
        })
    }

    fn require_link(&self, name: &str) -> Result<&str> {
        self.link(name).ok_or_else(|| {
            tracing::warn!("Unknown link '{}' on {:?}", name, self.type_name());
            Error::UnknownLink {
                name: name.to_string(),
                valid: self.link_names(),
            }
        })
    }

    fn require_action(&self, name: &str) -> Result<&str> {
        self.action(name).ok_or_else(|| {
            tracing::warn!("Unknown action '{}' on {:?}", name, self.type_name());
            Error::UnknownAction {
                name: name.to_string(),
                valid: self.action_names(),
            }
        })
    }

    /// GET the named link
    pub async fn follow_link(&self, name: &str) -> Result<Resource> {
        let url = self.require_link(name)?;
        self.client.request_as_resource(Method::GET, url, None).await
    }

    /// POST `payload` to the named action
    pub async fn do_action(&self, name: &str, payload: Option<&Value>) -> Result<Resource> {
        let url = self.require_action(name)?;
        self.client.request_as_resource(Method::POST, url, payload).await
    }

    /// PUT the current fields to the `self` link
    pub async fn save(&self) -> Result<Resource> {
        let url = self.self_link()?;
        let body = Value::Object(self.fields.clone());
        self.client.request_as_resource(Method::PUT, url, Some(&body)).await
    }

    /// GET the `self` link
    pub async fn reload(&self) -> Result<Resource> {
        let url = self.self_link()?;
        self.client.request_as_resource(Method::GET, url, None).await
    }

    /// DELETE the `self` link. `None` when the server answers without a body.
    pub async fn delete(&self) -> Result<Option<Resource>> {
        let url = self.self_link()?;
        match self.client.request(Method::DELETE, url, None).await? {
            Value::Null => Ok(None),
            value => self.client.instantiate(value).map(Some),
        }
    }

    /// Items carried by this resource: the embedded `data` of a collection,
    /// otherwise the resource itself
    pub fn items(&self) -> Result<Vec<Resource>> {
        match self.kind {
            ResourceKind::Collection => collection::instantiate_items(self),
            ResourceKind::Resource | ResourceKind::Schema => Ok(vec![self.clone()]),
        }
    }
}

/// Serializes as the bare field map
impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.fields == other.fields
    }
}
