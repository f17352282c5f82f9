// src/changes.rs

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One leaf value in the changes map. The widget that produced the value
/// decides the variant; nothing re-checks it against the field's declared
/// type afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    /// Raw value emitted by the date picker; normalized only for display.
    Date(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => Some(s),
            FieldValue::Bool(_) => None,
        }
    }

    /// Truthiness used by the boolean adapter.
    pub fn truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) | FieldValue::Date(s) => !s.is_empty(),
        }
    }

    fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => JsonValue::String(s.clone()),
            FieldValue::Bool(b) => JsonValue::Bool(*b),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChangeNode {
    Leaf(FieldValue),
    Branch(BTreeMap<String, Arc<ChangeNode>>),
}

/// Nested changes map keyed by dotted paths. Writes copy only the nodes
/// along the written path; untouched branches keep their `Arc` identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeTree {
    root: BTreeMap<String, Arc<ChangeNode>>,
}

impl ChangeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Set the leaf at the dotted path `key`, creating intermediate branches
    /// on demand. A leaf in the middle of the path is replaced by a branch.
    /// Last write wins.
    pub fn set(&mut self, key: &str, value: FieldValue) {
        let segments: Vec<&str> = key.split('.').collect();
        self.root = set_in(&self.root, &segments, value);
    }

    /// Leaf lookup at a dotted path. Absence is not an error.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.root.get(first)?.as_ref();

        for seg in segments {
            match node {
                ChangeNode::Branch(children) => node = children.get(seg)?.as_ref(),
                ChangeNode::Leaf(_) => return None,
            }
        }

        match node {
            ChangeNode::Leaf(v) => Some(v),
            ChangeNode::Branch(_) => None,
        }
    }

    /// Shared handle on a top-level entry; used to observe structural sharing.
    pub fn node(&self, top_key: &str) -> Option<Arc<ChangeNode>> {
        self.root.get(top_key).cloned()
    }

    /// Plain JSON form, byte-compatible with the persisted blob.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(map_to_json(&self.root))
    }

    /// Rebuild from persisted JSON. Strings become `Text` (the date adapter
    /// re-normalizes for display), booleans become `Bool`, other scalars are
    /// coerced through their display form, nulls are dropped.
    pub fn from_json(value: &JsonValue) -> Self {
        let root = match value {
            JsonValue::Object(map) => map_from_json(map),
            _ => BTreeMap::new(),
        };
        Self { root }
    }
}

fn set_in(
    children: &BTreeMap<String, Arc<ChangeNode>>,
    segments: &[&str],
    value: FieldValue,
) -> BTreeMap<String, Arc<ChangeNode>> {
    // Clone the map; sibling Arcs are shared, only this path gets new nodes.
    let mut out = children.clone();
    let (head, rest) = match segments.split_first() {
        Some(x) => x,
        None => return out,
    };

    if rest.is_empty() {
        out.insert(head.to_string(), Arc::new(ChangeNode::Leaf(value)));
        return out;
    }

    let inner = match out.get(*head).map(Arc::as_ref) {
        Some(ChangeNode::Branch(inner)) => set_in(inner, rest, value),
        // Missing or a leaf: start a fresh branch at this level.
        _ => set_in(&BTreeMap::new(), rest, value),
    };

    out.insert(head.to_string(), Arc::new(ChangeNode::Branch(inner)));
    out
}

fn map_to_json(children: &BTreeMap<String, Arc<ChangeNode>>) -> serde_json::Map<String, JsonValue> {
    let mut out = serde_json::Map::new();
    for (k, node) in children {
        let v = match node.as_ref() {
            ChangeNode::Leaf(v) => v.to_json(),
            ChangeNode::Branch(inner) => JsonValue::Object(map_to_json(inner)),
        };
        out.insert(k.clone(), v);
    }
    out
}

fn map_from_json(map: &serde_json::Map<String, JsonValue>) -> BTreeMap<String, Arc<ChangeNode>> {
    let mut out = BTreeMap::new();
    for (k, v) in map {
        let node = match v {
            JsonValue::Object(inner) => ChangeNode::Branch(map_from_json(inner)),
            JsonValue::String(s) => ChangeNode::Leaf(FieldValue::Text(s.clone())),
            JsonValue::Bool(b) => ChangeNode::Leaf(FieldValue::Bool(*b)),
            JsonValue::Number(n) => ChangeNode::Leaf(FieldValue::Text(n.to_string())),
            JsonValue::Null => continue,
            JsonValue::Array(_) => continue,
        };
        out.insert(k.clone(), Arc::new(node));
    }
    out
}
