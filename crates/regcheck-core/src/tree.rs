//! # Order-Preserving JSON Tree
//!
//! `serde_json::Value` stores objects in a map, so a key that appears twice
//! silently keeps its last value. [`JsonTree`] stores object members as a
//! list in source order, which lets [`JsonTree::duplicate_keys`] see every
//! repetition.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};

use crate::error::ParseError;

/// A JSON value whose objects keep every member, duplicates included.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonTree {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonTree>),
    Object(Vec<(String, JsonTree)>),
}

/// A key that occurs more than once in the same object.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateKey {
    /// JSON Pointer of the object holding the key (empty for the root).
    pub pointer: String,
    /// The repeated key.
    pub key: String,
    /// Value of the repeated occurrence.
    pub value: Value,
}

impl JsonTree {
    /// Parse text into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is not a single valid JSON value.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Convert to a `serde_json::Value`; repeated keys keep their last value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Object(members) => {
                let mut map = Map::new();
                for (key, value) in members {
                    map.insert(key.clone(), value.to_value());
                }
                Value::Object(map)
            }
        }
    }

    /// Every repeated key in every object, in document order.
    ///
    /// The first occurrence of a key is never reported; each later one is.
    pub fn duplicate_keys(&self) -> Vec<DuplicateKey> {
        let mut found = Vec::new();
        let mut pointer = String::new();
        self.collect_duplicates(&mut pointer, &mut found);
        found
    }

    fn collect_duplicates(&self, pointer: &mut String, found: &mut Vec<DuplicateKey>) {
        match self {
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let len = pointer.len();
                    pointer.push('/');
                    pointer.push_str(&i.to_string());
                    item.collect_duplicates(pointer, found);
                    pointer.truncate(len);
                }
            }
            Self::Object(members) => {
                let mut seen = HashSet::with_capacity(members.len());
                for (key, value) in members {
                    if !seen.insert(key.as_str()) {
                        found.push(DuplicateKey {
                            pointer: pointer.clone(),
                            key: key.clone(),
                            value: value.to_value(),
                        });
                    }
                }
                for (key, value) in members {
                    let len = pointer.len();
                    pointer.push('/');
                    push_escaped(pointer, key);
                    value.collect_duplicates(pointer, found);
                    pointer.truncate(len);
                }
            }
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => {}
        }
    }
}

/// Append a JSON Pointer reference token (RFC 6901 escaping).
fn push_escaped(pointer: &mut String, token: &str) {
    for c in token.chars() {
        match c {
            '~' => pointer.push_str("~0"),
            '/' => pointer.push_str("~1"),
            other => pointer.push(other),
        }
    }
}

impl<'de> Deserialize<'de> for JsonTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TreeVisitor)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = JsonTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<JsonTree, E> {
        Ok(JsonTree::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<JsonTree, E> {
        Ok(JsonTree::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<JsonTree, E> {
        Ok(JsonTree::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonTree, E> {
        Number::from_f64(v)
            .map(JsonTree::Number)
            .ok_or_else(|| E::custom(format!("number {v} is not representable in JSON")))
    }

    fn visit_str<E>(self, v: &str) -> Result<JsonTree, E> {
        Ok(JsonTree::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<JsonTree, E> {
        Ok(JsonTree::String(v))
    }

    fn visit_unit<E>(self) -> Result<JsonTree, E> {
        Ok(JsonTree::Null)
    }

    fn visit_none<E>(self) -> Result<JsonTree, E> {
        Ok(JsonTree::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<JsonTree, D::Error>
    where
        D: Deserializer<'de>,
    {
        JsonTree::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<JsonTree, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(JsonTree::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<JsonTree, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, JsonTree>()? {
            members.push((key, value));
        }
        Ok(JsonTree::Object(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_keeps_member_order_and_duplicates() {
        let tree = JsonTree::parse(r#"{"b": 1, "a": 2, "b": 3}"#).unwrap();
        let JsonTree::Object(members) = tree else {
            panic!("expected object");
        };
        let keys: Vec<&str> = members.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a", "b"]);
    }

    #[test]
    fn no_duplicates_in_clean_document() {
        let tree = JsonTree::parse(r#"{"users": [{"a": 1}, {"a": 2}], "a": [1, 1]}"#).unwrap();
        assert!(tree.duplicate_keys().is_empty());
    }

    #[test]
    fn duplicate_reports_later_value_and_pointer() {
        let tree = JsonTree::parse(
            r#"{"users": [{"launchpad_id": "x"}, {"launchpad_id": "y", "launchpad_id": "z"}]}"#,
        )
        .unwrap();
        let dups = tree.duplicate_keys();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].pointer, "/users/1");
        assert_eq!(dups[0].key, "launchpad_id");
        assert_eq!(dups[0].value, json!("z"));
    }

    #[test]
    fn triple_key_reported_twice() {
        let tree = JsonTree::parse(r#"{"k": 1, "k": 2, "k": 3}"#).unwrap();
        let values: Vec<Value> = tree.duplicate_keys().into_iter().map(|d| d.value).collect();
        assert_eq!(values, [json!(2), json!(3)]);
    }

    #[test]
    fn same_key_at_different_levels_is_not_duplicate() {
        let tree = JsonTree::parse(r#"{"name": {"name": {"name": 1}}}"#).unwrap();
        assert!(tree.duplicate_keys().is_empty());
    }

    #[test]
    fn pointer_escapes_special_characters() {
        let tree = JsonTree::parse(r#"{"a/b~c": {"x": 1, "x": 2}}"#).unwrap();
        assert_eq!(tree.duplicate_keys()[0].pointer, "/a~1b~0c");
    }

    #[test]
    fn to_value_matches_serde_json_last_wins() {
        let raw = r#"{"a": [1, 2.5, null, true, "s"], "a": {"k": "v"}}"#;
        let tree = JsonTree::parse(raw).unwrap();
        let direct: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(tree.to_value(), direct);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        let err = JsonTree::parse("{\"a\": 1,}").unwrap_err();
        assert_eq!(err.line, 1);
    }
}
