//! Factories - how a registry entry constructs its knowledge base.

use std::sync::Arc;

use skb_core::{KnowledgeBase, SkbResult};

use crate::config::SkbConfig;

/// A loaded knowledge base shared between all resolvers of its name.
pub type SharedKnowledgeBase = Arc<dyn KnowledgeBase>;

/// Constructs (usually loads) a knowledge base on first resolution.
pub trait KnowledgeBaseFactory: Send + Sync {
    fn create(&self) -> SkbResult<SharedKnowledgeBase>;
}

impl<F> KnowledgeBaseFactory for F
where
    F: Fn() -> SkbResult<SharedKnowledgeBase> + Send + Sync,
{
    fn create(&self) -> SkbResult<SharedKnowledgeBase> {
        self()
    }
}

/// Factory that loads a dataset variant using shared configuration.
pub fn config_factory<K, L>(config: Arc<SkbConfig>, load: L) -> impl KnowledgeBaseFactory
where
    K: KnowledgeBase + 'static,
    L: Fn(&SkbConfig) -> SkbResult<K> + Send + Sync,
{
    move || -> SkbResult<SharedKnowledgeBase> { Ok(Arc::new(load(&config)?)) }
}

/// Factory handing out an already constructed knowledge base.
pub fn instance_factory(kb: SharedKnowledgeBase) -> impl KnowledgeBaseFactory {
    move || -> SkbResult<SharedKnowledgeBase> { Ok(Arc::clone(&kb)) }
}
