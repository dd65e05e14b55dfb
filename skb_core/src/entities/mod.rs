//! Entity and relation definitions for structured knowledge bases.

mod entity;
mod relation;

pub use entity::*;
pub use relation::*;

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity within one knowledge base.
///
/// Ids are opaque: their numeric value carries no meaning beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Get the raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
