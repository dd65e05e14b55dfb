//! Relation definitions - typed edges between entities.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A directed, typed edge `source -[relation]-> target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub source: EntityId,

    /// Relation type (e.g. "also_buy", "cites").
    pub relation: String,

    pub target: EntityId,
}

impl Relation {
    /// Create a new relation.
    pub fn new(source: EntityId, relation: impl Into<String>, target: EntityId) -> Self {
        Self {
            source,
            relation: relation.into(),
            target,
        }
    }

    /// Check if this relation has the given type.
    pub fn is_type(&self, relation: &str) -> bool {
        self.relation == relation
    }

    /// Check if this relation touches the given entity on either end.
    pub fn involves(&self, id: EntityId) -> bool {
        self.source == id || self.target == id
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.relation, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_creation() {
        let rel = Relation::new(EntityId(1), "cites", EntityId(2));
        assert_eq!(rel.source, EntityId(1));
        assert_eq!(rel.target, EntityId(2));
        assert!(rel.is_type("cites"));
        assert!(!rel.is_type("writes"));
    }

    #[test]
    fn test_relation_involves() {
        let rel = Relation::new(EntityId(1), "cites", EntityId(2));
        assert!(rel.involves(EntityId(1)));
        assert!(rel.involves(EntityId(2)));
        assert!(!rel.involves(EntityId(3)));
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(Relation::new(EntityId(4), "has_brand", EntityId(9)).to_string(), "4 -[has_brand]-> 9");
    }
}
