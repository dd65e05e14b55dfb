//! # SKB Core
//!
//! Data model and contract for structured knowledge bases: datasets of
//! entities and typed relations between them, queryable by identifier.
//! This crate knows nothing about particular datasets or the registry.
//!
//! - **entities**: `EntityId`, `Entity`, `Relation`
//! - **knowledge_base**: the `KnowledgeBase` trait and document rendering
//! - **store**: the generic in-memory `Skb` and its JSON snapshots

pub mod entities;
pub mod error;
pub mod knowledge_base;
pub mod store;

pub use entities::*;
pub use error::*;
pub use knowledge_base::*;
pub use store::*;
