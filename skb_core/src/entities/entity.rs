//! Entity definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::EntityId;

/// A node of a structured knowledge base.
///
/// Entities are built while a knowledge base loads and are never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,

    /// Kind of node (e.g. "product", "paper", "disease").
    pub node_type: String,

    /// Attribute name -> value.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl Entity {
    /// Create an entity with no attributes.
    pub fn new(id: EntityId, node_type: impl Into<String>) -> Self {
        Self {
            id,
            node_type: node_type.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Get an attribute rendered as plain text.
    ///
    /// Strings are returned without quotes, arrays are joined with ", ",
    /// and null attributes count as missing.
    pub fn attribute_text(&self, name: &str) -> Option<String> {
        self.attributes.get(name).and_then(value_text)
    }

    /// Check whether this entity is of the given node type.
    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }
}

/// Render a JSON value as document text.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<_> = items.iter().filter_map(value_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        other => Some(other.to_string()),
    }
}
