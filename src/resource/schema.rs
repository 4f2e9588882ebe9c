//! Schema representation
//!
//! Describes one resource type: its fields, the HTTP methods allowed on the
//! collection and on individual resources, and the actions it exposes.

use super::model::Resource;
use super::registry::ResourceKind;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::ops::Deref;

/// A resource dispatched as [`ResourceKind::Schema`]
#[derive(Debug, Clone, PartialEq)]
pub struct Schema(Resource);

impl TryFrom<Resource> for Schema {
    type Error = Error;

    fn try_from(resource: Resource) -> Result<Self> {
        match resource.kind() {
            ResourceKind::Schema => Ok(Self(resource)),
            other => Err(Error::NotA {
                expected: ResourceKind::Schema.name(),
                found: other.name(),
            }),
        }
    }
}

impl Deref for Schema {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.0
    }
}

fn methods<'a>(schema: &'a Schema, key: &str) -> Vec<&'a str> {
    schema
        .get(key)
        .and_then(Value::as_array)
        .map(|methods| methods.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

impl Schema {
    pub fn into_inner(self) -> Resource {
        self.0
    }

    /// Field definitions keyed by field name
    pub fn resource_fields(&self) -> Option<&Map<String, Value>> {
        self.get("resourceFields").and_then(Value::as_object)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.resource_fields()?.get(name)
    }

    /// Declared type of a field, e.g. `string` or `reference[host]`
    pub fn field_type(&self, name: &str) -> Option<&str> {
        self.field(name)?.get("type")?.as_str()
    }

    pub fn collection_methods(&self) -> Vec<&str> {
        methods(self, "collectionMethods")
    }

    pub fn resource_methods(&self) -> Vec<&str> {
        methods(self, "resourceMethods")
    }

    /// Action definitions keyed by action name
    pub fn resource_actions(&self) -> Option<&Map<String, Value>> {
        self.get("resourceActions").and_then(Value::as_object)
    }

    pub fn can_list(&self) -> bool {
        self.collection_methods().contains(&"GET")
    }

    pub fn can_create(&self) -> bool {
        self.collection_methods().contains(&"POST")
    }

    pub fn can_update(&self) -> bool {
        self.resource_methods().contains(&"PUT")
    }

    pub fn can_delete(&self) -> bool {
        self.resource_methods().contains(&"DELETE")
    }
}
