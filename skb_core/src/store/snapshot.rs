//! JSON snapshots - the on-disk form a knowledge base is loaded from.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::entities::{Entity, Relation};
use crate::error::{SkbError, SkbResult};

/// Serialized contents of a knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkbSnapshot {
    #[serde(default)]
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl SkbSnapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(json: &str) -> SkbResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot from a JSON file.
    pub fn read(path: impl AsRef<Path>) -> SkbResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SkbError::io(path, e))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Write the snapshot as pretty-printed JSON, creating parent directories.
    pub fn write(&self, path: impl AsRef<Path>) -> SkbResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SkbError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| SkbError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntityId;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = SkbSnapshot::from_json_str(
            r#"{
                "entities": [
                    {"id": 0, "node_type": "disease", "attributes": {"name": "flu"}},
                    {"id": 1, "node_type": "drug"}
                ],
                "relations": [{"source": 1, "relation": "indication", "target": 0}]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.entities.len(), 2);
        assert_eq!(snapshot.relations[0].target, EntityId(0));
    }

    #[test]
    fn test_empty_object_is_empty_snapshot() {
        assert_eq!(SkbSnapshot::from_json_str("{}").unwrap(), SkbSnapshot::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SkbSnapshot::from_json_str("{\"entities\": 3}"),
            Err(SkbError::Json(_))
        ));
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("skb.json");
        let snapshot = SkbSnapshot {
            entities: vec![Entity::new(EntityId(1), "gene")],
            relations: vec![],
        };

        snapshot.write(&path).unwrap();
        assert_eq!(SkbSnapshot::read(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_read_missing_file() {
        let err = SkbSnapshot::read("/nonexistent/skb.json").unwrap_err();
        assert!(matches!(err, SkbError::Io { .. }));
    }
}
