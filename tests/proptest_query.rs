//! Property-based tests using proptest
//!
//! These tests verify URL resolution, query string construction and the
//! JSON round-trip of resources using randomized inputs.

use hypermedia_client::{
    append_filters, build_complex_query, resolve, Client, Condition, Filter, FilterSpec,
    QueryParams,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn arb_segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}"
}

fn arb_path() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_segment(), 1..4).prop_map(|segments| segments.join("/"))
}

/// Scalar filter values (never null)
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9 &=]{0,10}".prop_map(Value::String),
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn arb_filter() -> impl Strategy<Value = Filter> {
    prop_oneof![
        arb_scalar().prop_map(Filter::Value),
        prop::collection::vec(
            (prop_oneof!["eq", "ne", "lt", "gt", "like"], arb_scalar())
                .prop_map(|(modifier, value)| Condition::new(&modifier, value)),
            0..4
        )
        .prop_map(Filter::Conditions),
    ]
}

fn arb_filter_spec() -> impl Strategy<Value = FilterSpec> {
    prop::collection::btree_map("[a-z]{1,8}", arb_filter(), 0..6)
}

/// JSON without floats, so text round-trips are exact
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn query_pairs(url: &str) -> Vec<(String, String)> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Tests for relative URL resolution
mod resolve_tests {
    use super::*;

    proptest! {
        /// A trailing slash on the base and a leading slash on the fragment
        /// never change the result
        #[test]
        fn slash_insensitive(base in arb_path(), fragment in arb_path()) {
            let base = format!("http://h/{}", base);
            let expected = resolve(&base, &fragment).unwrap();

            prop_assert_eq!(&resolve(&format!("{}/", base), &fragment).unwrap(), &expected);
            prop_assert_eq!(&resolve(&base, &format!("/{}", fragment)).unwrap(), &expected);
            prop_assert_eq!(&resolve(&format!("{}/", base), &format!("/{}", fragment)).unwrap(), &expected);
            prop_assert_eq!(expected, format!("{}/{}", base, fragment));
        }

        /// Each `..` removes exactly one base segment while any are left
        #[test]
        fn parent_segments_climb(segments in prop::collection::vec(arb_segment(), 1..5), target in arb_segment()) {
            let base = format!("http://h/{}", segments.join("/"));
            let fragment = format!("../{}", target);
            let mut expected_path = segments.clone();
            expected_path.pop();
            expected_path.push(target);
            prop_assert_eq!(
                resolve(&base, &fragment).unwrap(),
                format!("http://h/{}", expected_path.join("/"))
            );
        }
    }
}

/// Tests for filter and parameter encoding
mod query_tests {
    use super::*;

    proptest! {
        /// Filter fields are emitted in lexicographic order
        #[test]
        fn filters_sorted_by_field(filters in arb_filter_spec()) {
            let url = append_filters("http://e.com/items", &filters).unwrap();
            let fields: Vec<String> = query_pairs(&url)
                .into_iter()
                .map(|(key, _)| key.split('_').next().unwrap_or_default().to_string())
                .collect();

            let mut sorted = fields.clone();
            sorted.sort();
            prop_assert_eq!(fields, sorted);
        }

        /// One parameter per condition, keys suffixed unless the modifier is eq
        #[test]
        fn one_parameter_per_condition(filters in arb_filter_spec()) {
            let url = append_filters("http://e.com/items", &filters).unwrap();
            let pairs = query_pairs(&url);

            let expected: Vec<String> = filters
                .iter()
                .flat_map(|(field, filter)| match filter {
                    Filter::Value(_) => vec![field.clone()],
                    Filter::Conditions(conditions) => conditions
                        .iter()
                        .map(|c| if c.modifier == "eq" {
                            field.clone()
                        } else {
                            format!("{}_{}", field, c.modifier)
                        })
                        .collect(),
                })
                .collect();
            let keys: Vec<String> = pairs.into_iter().map(|(key, _)| key).collect();
            prop_assert_eq!(keys, expected);
        }

        /// Setting the same parameters twice gives the same URL
        #[test]
        fn params_are_idempotent(
            sort in "[a-z]{1,8}",
            limit in 1u32..500,
            existing in "[a-z]{1,5}"
        ) {
            let params: QueryParams = serde_json::from_value(json!({"sort": sort, "limit": limit})).unwrap();
            let url = format!("http://e.com/items?{}=x&sort=old", existing);

            let once = build_complex_query(&url, None, Some(&params)).unwrap();
            let twice = build_complex_query(&once, None, Some(&params)).unwrap();
            prop_assert_eq!(&once, &twice);

            let pairs = query_pairs(&once);
            prop_assert_eq!(pairs.iter().filter(|(k, _)| k == "sort").count(), 1);
            prop_assert!(pairs.contains(&("order".to_string(), "asc".to_string())));
        }
    }
}

/// Tests for resource serialization
mod roundtrip_tests {
    use super::*;

    struct NoTransport;

    #[async_trait::async_trait]
    impl hypermedia_client::Transport for NoTransport {
        async fn request(
            &self,
            _method: reqwest::Method,
            url: &str,
            _body: Option<&Value>,
        ) -> anyhow::Result<Value> {
            Err(anyhow::anyhow!("unexpected request to {}", url))
        }
    }

    proptest! {
        /// Serializing a resource and decoding it again keeps every field
        #[test]
        fn fields_roundtrip(fields in prop::collection::btree_map("[a-zA-Z_]{1,8}", arb_json(), 0..8)) {
            let client = Client::with_transport("http://h/v1", Arc::new(NoTransport)).unwrap();
            let fields: Map<String, Value> = fields.into_iter().collect();
            let resource = client.instantiate(Value::Object(fields.clone())).unwrap();

            let text = serde_json::to_string(&resource).unwrap();
            let back = hypermedia_client::Resource::from_json(&text, &client).unwrap();

            prop_assert_eq!(back.fields(), &fields);
            prop_assert_eq!(back.kind(), resource.kind());
        }
    }
}
