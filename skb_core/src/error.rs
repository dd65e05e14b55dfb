//! Error types shared by every knowledge base and by the registry.

use std::path::PathBuf;

use thiserror::Error;

use crate::entities::EntityId;

/// Result alias used throughout the SKB crates.
pub type SkbResult<T> = Result<T, SkbError>;

/// Errors raised while loading, resolving, or querying knowledge bases.
#[derive(Debug, Error)]
pub enum SkbError {
    // Registry errors
    #[error("unknown knowledge base '{name}' (registered: {})", known.join(", "))]
    UnknownName { name: String, known: Vec<String> },

    #[error("knowledge base '{0}' is already registered")]
    DuplicateName(String),

    // Query errors
    #[error("entity {0} not found")]
    NotFound(EntityId),

    // Load errors
    #[error("entity {0} appears more than once")]
    DuplicateEntity(EntityId),

    #[error("relation {from} -[{relation}]-> {to} references a missing entity")]
    DanglingRelation {
        from: EntityId,
        relation: String,
        to: EntityId,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    // Evaluation errors
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("evaluator needs at least one candidate id")]
    EmptyCandidates,

    #[error("batch has {predictions} prediction sets but {answers} answer sets")]
    BatchMismatch { predictions: usize, answers: usize },
}

impl SkbError {
    /// Wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
