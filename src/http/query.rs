//! Query string construction
//!
//! Filters are appended (a field may repeat), plain parameters are set
//! (an existing value is replaced in place). Filter fields are always emitted
//! in lexicographic order so equal filter sets produce equal URLs.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use url::form_urlencoded;
use url::Url;

/// Modifier meaning plain equality; it does not alter the parameter key.
pub const EQ_MODIFIER: &str = "eq";

fn default_modifier() -> String {
    EQ_MODIFIER.to_string()
}

/// A null or empty modifier means `eq`
fn modifier_or_eq<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let modifier = Option::<String>::deserialize(deserializer)?;
    Ok(modifier
        .filter(|m| !m.is_empty())
        .unwrap_or_else(default_modifier))
}

/// A single condition on a field, e.g. `{"modifier": "ne", "value": "apple"}`.
/// A condition without a value is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    #[serde(default = "default_modifier", deserialize_with = "modifier_or_eq")]
    pub modifier: String,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn eq(value: impl Into<Value>) -> Self {
        Self::new(EQ_MODIFIER, value)
    }

    pub fn new(modifier: &str, value: impl Into<Value>) -> Self {
        Self {
            modifier: modifier.to_string(),
            value: value.into(),
        }
    }

    /// Query parameter key this condition is emitted under
    fn key(&self, field: &str) -> String {
        if self.modifier.is_empty() || self.modifier == EQ_MODIFIER {
            field.to_string()
        } else {
            format!("{}_{}", field, self.modifier)
        }
    }
}

/// Filter on one field: a list of conditions or a bare value meaning `eq`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    Conditions(Vec<Condition>),
    Value(Value),
}

impl From<Value> for Filter {
    fn from(value: Value) -> Self {
        Filter::Value(value)
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::Value(Value::String(value.to_string()))
    }
}

impl From<Vec<Condition>> for Filter {
    fn from(conditions: Vec<Condition>) -> Self {
        Filter::Conditions(conditions)
    }
}

/// Field name to filter. The ordered map gives the lexicographic emission order.
pub type FilterSpec = BTreeMap<String, Filter>;

/// Plain query parameters, applied in insertion order.
pub type QueryParams = Map<String, Value>;

/// Render a JSON scalar as a query parameter value. Null renders as nothing;
/// arrays and objects have no query form and are rejected.
fn param_value(key: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(Error::InvalidQueryValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// A URL split around its query so parameters can be edited without the
/// rest of the URL being re-serialized.
struct QueryUrl {
    head: String,
    pairs: Vec<(String, String)>,
    anchor: Option<String>,
}

impl QueryUrl {
    fn parse(url: &str) -> Result<Self> {
        Url::parse(url).map_err(|e| Error::invalid_url(url, e))?;

        let (rest, anchor) = match url.split_once('#') {
            Some((rest, anchor)) => (rest, Some(anchor.to_string())),
            None => (url, None),
        };
        let (head, query) = rest.split_once('?').unwrap_or((rest, ""));

        let pairs = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        Ok(Self {
            head: head.to_string(),
            pairs,
            anchor,
        })
    }

    fn append(&mut self, key: String, value: String) {
        self.pairs.push((key, value));
    }

    /// Replace the first occurrence of `key`, dropping any repeats, or
    /// append it when absent
    fn set(&mut self, key: &str, value: String) {
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }
}

impl fmt::Display for QueryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.head)?;
        if !self.pairs.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.pairs)
                .finish();
            write!(f, "?{}", query)?;
        }
        if let Some(anchor) = &self.anchor {
            write!(f, "#{}", anchor)?;
        }
        Ok(())
    }
}

fn push_filters(url: &mut QueryUrl, filters: &FilterSpec) -> Result<()> {
    for (field, filter) in filters {
        match filter {
            Filter::Value(value) => {
                if let Some(value) = param_value(field, value)? {
                    url.append(field.clone(), value);
                }
            }
            Filter::Conditions(conditions) => {
                for condition in conditions {
                    let key = condition.key(field);
                    if let Some(value) = param_value(&key, &condition.value)? {
                        url.append(key, value);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Append one query parameter per filter condition.
///
/// ```ignore
/// let mut filters = FilterSpec::new();
/// filters.insert("food".into(), vec![Condition::new("ne", "apple")].into());
/// assert_eq!(append_filters("http://e.com", &filters)?, "http://e.com?food_ne=apple");
/// ```
pub fn append_filters(url: &str, filters: &FilterSpec) -> Result<String> {
    let mut parsed = QueryUrl::parse(url)?;
    push_filters(&mut parsed, filters)?;
    Ok(parsed.to_string())
}

/// Apply filters, then set each of `params` on the URL.
///
/// A `sort` parameter without an `order` gets `order=asc`. A null parameter
/// value removes that parameter from the URL.
pub fn build_complex_query(
    url: &str,
    filters: Option<&FilterSpec>,
    params: Option<&QueryParams>,
) -> Result<String> {
    let mut parsed = QueryUrl::parse(url)?;

    if let Some(filters) = filters {
        push_filters(&mut parsed, filters)?;
    }

    if let Some(params) = params {
        let mut params = params.clone();
        if params.contains_key("sort") && !params.contains_key("order") {
            params.insert("order".to_string(), Value::String("asc".to_string()));
        }

        for (key, value) in &params {
            match param_value(key, value)? {
                Some(value) => parsed.set(key, value),
                None => parsed.remove(key),
            }
        }
    }

    Ok(parsed.to_string())
}
