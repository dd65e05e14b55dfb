//! The knowledge base contract every dataset implementation satisfies.
//!
//! A knowledge base is loaded once and then only queried:
//! - **Entities**: looked up by id, enumerated in load order
//! - **Relations**: outgoing typed edges of an entity
//! - **Candidates**: the entities a retrieval system may return
//! - **Documents**: a textual rendering of an entity for indexing

mod doc;

pub use doc::*;

use std::collections::BTreeSet;

use crate::entities::{Entity, EntityId, Relation};
use crate::error::SkbResult;

/// Read-only access to a loaded structured knowledge base.
///
/// Implementations must be shareable across threads; nothing mutates after
/// load.
pub trait KnowledgeBase: Send + Sync + std::fmt::Debug {
    /// The registry key this instance was loaded under.
    fn name(&self) -> &str;

    /// Look up an entity, failing with [`SkbError::NotFound`](crate::SkbError::NotFound)
    /// if the id is absent.
    fn get_entity(&self, id: EntityId) -> SkbResult<&Entity>;

    /// Iterate over all entity ids in load order.
    ///
    /// Every call starts a fresh iteration.
    fn entity_ids(&self) -> EntityIds<'_>;

    /// Outgoing relations of an entity, in load order.
    ///
    /// Entities without relations (and absent ids) yield an empty slice.
    fn relations_for(&self, id: EntityId) -> &[Relation];

    /// Total number of entities.
    fn entity_count(&self) -> usize;

    /// Total number of relations.
    fn relation_count(&self) -> usize;

    /// Check if an entity exists.
    fn contains(&self, id: EntityId) -> bool {
        self.get_entity(id).is_ok()
    }

    /// Ids of the entities that are retrieval candidates, in load order.
    fn candidate_ids(&self) -> Vec<EntityId> {
        self.entity_ids().collect()
    }

    /// Attribute used as an entity's display title.
    fn title_attribute(&self) -> &str {
        DEFAULT_TITLE_ATTRIBUTE
    }

    /// Targets of the outgoing relations of `id`, optionally restricted to
    /// one relation type. Duplicates are dropped, first occurrence wins.
    fn neighbors(&self, id: EntityId, relation: Option<&str>) -> Vec<EntityId> {
        let mut seen = BTreeSet::new();
        self.relations_for(id)
            .iter()
            .filter(|r| relation.map_or(true, |wanted| r.is_type(wanted)))
            .filter(|r| seen.insert(r.target))
            .map(|r| r.target)
            .collect()
    }

    /// Distinct node types, sorted.
    fn node_types(&self) -> BTreeSet<&str> {
        self.entity_ids()
            .filter_map(|id| self.get_entity(id).ok())
            .map(|e| e.node_type.as_str())
            .collect()
    }

    /// Distinct relation types, sorted.
    fn relation_types(&self) -> BTreeSet<&str> {
        self.entity_ids()
            .flat_map(|id| self.relations_for(id))
            .map(|r| r.relation.as_str())
            .collect()
    }

    /// Render an entity as a text document.
    fn doc_info(&self, id: EntityId, options: DocOptions) -> SkbResult<String> {
        render_doc(self, id, options)
    }
}

/// Lazy iterator over entity ids in load order.
#[derive(Debug, Clone)]
pub struct EntityIds<'a> {
    inner: std::slice::Iter<'a, Entity>,
}

impl<'a> EntityIds<'a> {
    /// Iterate over the ids of a slice of entities.
    pub fn new(entities: &'a [Entity]) -> Self {
        Self {
            inner: entities.iter(),
        }
    }
}

impl Iterator for EntityIds<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        self.inner.next().map(|e| e.id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for EntityIds<'_> {}
