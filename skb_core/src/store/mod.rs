//! In-memory knowledge base store - the generic [`Skb`] implementation.

mod snapshot;

pub use snapshot::*;

use std::collections::HashMap;
use std::path::Path;

use crate::entities::{Entity, EntityId, Relation};
use crate::error::{SkbError, SkbResult};
use crate::knowledge_base::{EntityIds, KnowledgeBase};

/// A loaded structured knowledge base.
///
/// Entities are kept in load order; relations are indexed by source entity.
#[derive(Debug, Clone)]
pub struct Skb {
    name: String,

    /// All entities in load order.
    entities: Vec<Entity>,

    /// Index: entity id -> position in `entities`.
    index: HashMap<EntityId, usize>,

    /// Adjacency list of outgoing relations.
    outgoing: HashMap<EntityId, Vec<Relation>>,

    relation_count: usize,
}

impl Skb {
    /// Build a knowledge base from a snapshot, validating its contents.
    pub fn from_snapshot(name: impl Into<String>, snapshot: SkbSnapshot) -> SkbResult<Self> {
        SkbBuilder::new(name)
            .entities(snapshot.entities)
            .relations(snapshot.relations)
            .build()
    }

    /// Load a knowledge base from a JSON snapshot file.
    pub fn load(name: impl Into<String>, path: impl AsRef<Path>) -> SkbResult<Self> {
        let name = name.into();
        let path = path.as_ref();
        tracing::debug!(name = %name, path = %path.display(), "Loading knowledge base snapshot");

        let snapshot = SkbSnapshot::read(path)?;
        Self::from_snapshot(name, snapshot)
    }

    /// Export the contents as a snapshot.
    pub fn to_snapshot(&self) -> SkbSnapshot {
        let relations = self
            .entities
            .iter()
            .flat_map(|e| self.relations_for(e.id))
            .cloned()
            .collect();

        SkbSnapshot {
            entities: self.entities.clone(),
            relations,
        }
    }

    /// All entities in load order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Get all entities of a node type.
    pub fn entities_of_type<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a Entity> {
        self.entities.iter().filter(move |e| e.is_type(node_type))
    }

    /// Relations pointing at an entity.
    pub fn incoming_relations(&self, id: EntityId) -> Vec<&Relation> {
        self.outgoing
            .values()
            .flatten()
            .filter(|r| r.target == id)
            .collect()
    }
}

impl KnowledgeBase for Skb {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_entity(&self, id: EntityId) -> SkbResult<&Entity> {
        self.index
            .get(&id)
            .map(|&pos| &self.entities[pos])
            .ok_or(SkbError::NotFound(id))
    }

    fn entity_ids(&self) -> EntityIds<'_> {
        EntityIds::new(&self.entities)
    }

    fn relations_for(&self, id: EntityId) -> &[Relation] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn relation_count(&self) -> usize {
        self.relation_count
    }

    fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }
}

/// Collects entities and relations, then validates them into an [`Skb`].
#[derive(Debug, Default)]
pub struct SkbBuilder {
    name: String,
    entities: Vec<Entity>,
    relations: Vec<Relation>,
}

impl SkbBuilder {
    /// Start an empty knowledge base with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an entity.
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Add multiple entities.
    pub fn entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.entities.extend(entities);
        self
    }

    /// Add a relation.
    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Add multiple relations.
    pub fn relations(mut self, relations: impl IntoIterator<Item = Relation>) -> Self {
        self.relations.extend(relations);
        self
    }

    /// Validate and index the collected data.
    ///
    /// Fails on duplicate entity ids and on relations whose endpoints are not
    /// loaded entities.
    pub fn build(self) -> SkbResult<Skb> {
        let mut index = HashMap::with_capacity(self.entities.len());
        for (pos, entity) in self.entities.iter().enumerate() {
            if index.insert(entity.id, pos).is_some() {
                return Err(SkbError::DuplicateEntity(entity.id));
            }
        }

        let relation_count = self.relations.len();
        let mut outgoing: HashMap<EntityId, Vec<Relation>> = HashMap::new();
        for rel in self.relations {
            if !index.contains_key(&rel.source) || !index.contains_key(&rel.target) {
                return Err(SkbError::DanglingRelation {
                    from: rel.source,
                    relation: rel.relation,
                    to: rel.target,
                });
            }
            outgoing.entry(rel.source).or_default().push(rel);
        }

        tracing::info!(
            name = %self.name,
            entities = self.entities.len(),
            relations = relation_count,
            "Knowledge base loaded"
        );

        Ok(Skb {
            name: self.name,
            entities: self.entities,
            index,
            outgoing,
            relation_count,
        })
    }
}
