//! Collection representation
//!
//! A collection payload embeds its items under `data` and, when paged, a
//! `pagination` object whose `next` URL points at the following page.

use super::model::Resource;
use super::registry::ResourceKind;
use crate::error::{Error, Result};
use reqwest::Method;
use serde_json::{Map, Value};
use std::ops::Deref;

/// A resource dispatched as [`ResourceKind::Collection`]
#[derive(Debug, Clone, PartialEq)]
pub struct Collection(Resource);

impl TryFrom<Resource> for Collection {
    type Error = Error;

    fn try_from(resource: Resource) -> Result<Self> {
        match resource.kind() {
            ResourceKind::Collection => Ok(Self(resource)),
            other => Err(Error::NotA {
                expected: ResourceKind::Collection.name(),
                found: other.name(),
            }),
        }
    }
}

impl Deref for Collection {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.0
    }
}

/// Build one resource per embedded `data` element, sharing the client
pub(crate) fn instantiate_items(resource: &Resource) -> Result<Vec<Resource>> {
    let client = resource.client();
    raw_items(resource)
        .iter()
        .map(|item| client.instantiate(item.clone()))
        .collect()
}

fn raw_items(resource: &Resource) -> &[Value] {
    resource
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

impl Collection {
    pub fn into_inner(self) -> Resource {
        self.0
    }

    /// Embedded item payloads, undecoded
    pub fn data(&self) -> &[Value] {
        raw_items(&self.0)
    }

    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Type name of the items, as announced by the server
    pub fn resource_type(&self) -> Option<&str> {
        self.get("resourceType").and_then(Value::as_str)
    }

    pub fn pagination(&self) -> Option<&Map<String, Value>> {
        self.get("pagination").and_then(Value::as_object)
    }

    /// URL of the following page, absent on the last page
    pub fn next_url(&self) -> Option<&str> {
        self.pagination()?.get("next")?.as_str()
    }

    /// Fetch the following page
    pub async fn next_page(&self) -> Result<Option<Collection>> {
        let Some(url) = self.next_url() else {
            return Ok(None);
        };
        let resource = self
            .client()
            .request_as_resource(Method::GET, url, None)
            .await?;
        Collection::try_from(resource).map(Some)
    }

    /// Fetch this page and every following one, returning all items
    pub async fn all_items(&self) -> Result<Vec<Resource>> {
        let mut items = self.items()?;
        let mut page = self.next_page().await?;

        while let Some(current) = page {
            items.extend(current.items()?);
            page = current.next_page().await?;
        }

        Ok(items)
    }
}
