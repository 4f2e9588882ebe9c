//! Resource Registry - Map payload types to representations
//!
//! Every decoded payload passes through [`Registry::instantiate`], which picks
//! the representation from the payload's `type` field. The fully-qualified
//! schema URL of the type is looked up before the short name.

use super::model::Resource;
use crate::error::{Error, Result};
use crate::http::client::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Representations a payload can be dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Resource,
    Collection,
    Schema,
}

impl ResourceKind {
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Resource => "resource",
            ResourceKind::Collection => "collection",
            ResourceKind::Schema => "schema",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builtin type names (compiled into the binary)
const BUILTIN_ENTRIES: &[(&str, ResourceKind)] = &[
    ("collection", ResourceKind::Collection),
    ("schema", ResourceKind::Schema),
];

/// Type identifier to representation table
#[derive(Debug, Clone)]
pub struct Registry {
    entries: HashMap<String, ResourceKind>,
    default_kind: ResourceKind,
}

/// Global registry with the builtin entries
static BUILTIN: OnceLock<Arc<Registry>> = OnceLock::new();

/// Get the builtin registry (built on first access)
pub fn builtin() -> Arc<Registry> {
    Arc::clone(BUILTIN.get_or_init(|| Arc::new(Registry::with_builtin_entries(ResourceKind::Resource))))
}

impl Registry {
    /// Empty registry falling back to `default_kind`
    pub fn new(default_kind: ResourceKind) -> Self {
        Self {
            entries: HashMap::new(),
            default_kind,
        }
    }

    /// Registry preloaded with the builtin entries
    pub fn with_builtin_entries(default_kind: ResourceKind) -> Self {
        let mut registry = Self::new(default_kind);
        for (name, kind) in BUILTIN_ENTRIES {
            registry.register(*name, *kind);
        }
        registry
    }

    /// Register a short type name or a fully-qualified schema URL
    pub fn register(&mut self, type_id: impl Into<String>, kind: ResourceKind) -> &mut Self {
        self.entries.insert(type_id.into(), kind);
        self
    }

    pub fn get(&self, type_id: &str) -> Option<ResourceKind> {
        self.entries.get(type_id).copied()
    }

    pub fn default_kind(&self) -> ResourceKind {
        self.default_kind
    }

    /// First registered candidate, in the order given. `None` means the
    /// default representation applies.
    pub fn resolve_implementation<'a, I>(&self, candidates: I) -> Option<ResourceKind>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates.into_iter().find_map(|candidate| self.get(candidate))
    }

    /// Dispatch a decoded payload to its representation
    pub fn instantiate(&self, fields: Value, client: &Client) -> Result<Resource> {
        let Value::Object(fields) = fields else {
            return Err(Error::MissingRequiredInput("fields"));
        };

        let type_short = fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let type_long = if type_short.is_empty() {
            None
        } else {
            Some(client.schemas_url(Some(type_short))?)
        };

        let kind = self
            .resolve_implementation(type_long.as_deref().into_iter().chain([type_short]))
            .unwrap_or(self.default_kind);

        tracing::trace!("dispatch type={:?} -> {}", type_short, kind);

        Ok(Resource::from_parts(fields, client.clone(), kind))
    }
}
