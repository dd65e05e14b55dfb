//! # SKB
//!
//! Named, swappable structured knowledge bases behind one registry.
//!
//! ## Core Components
//!
//! - **variants**: `AmazonSkb`, `PrimeSkb`, `MagSkb` - dataset-shaped views over the generic `Skb`
//! - **registry**: name -> factory table with cached, at-most-once construction
//! - **config**: where snapshots live and how each dataset is shaped
//! - **evaluation**: ranking metrics over a knowledge base's candidate set
//!
//! ```no_run
//! use skb::{KnowledgeBase, Registry, SkbConfig};
//!
//! let registry = Registry::with_defaults(SkbConfig::with_data_dir("data"))?;
//! let amazon = registry.resolve("amazon")?;
//! println!("{} candidates", amazon.candidate_ids().len());
//! # Ok::<(), skb::SkbError>(())
//! ```

pub mod config;
pub mod evaluation;
pub mod registry;
pub mod variants;

pub use config::*;
pub use evaluation::*;
pub use registry::*;
pub use variants::*;

pub use skb_core::{
    DocOptions, Entity, EntityId, KnowledgeBase, Relation, Skb, SkbBuilder, SkbError, SkbResult,
    SkbSnapshot,
};
