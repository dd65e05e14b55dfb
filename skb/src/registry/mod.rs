//! Registry - maps short dataset names to knowledge base factories.
//!
//! A registry is populated once through [`RegistryBuilder`] and is immutable
//! afterwards. Resolving a name constructs its knowledge base on first use
//! and caches it, so every later resolution returns the same instance.

mod factory;

pub use factory::*;

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

use skb_core::{SkbError, SkbResult};

use crate::config::SkbConfig;
use crate::variants::{AmazonSkb, MagSkb, PrimeSkb};

/// Names of the knowledge bases in the default registry.
pub const REGISTERED_SKBS: [&str; 3] = [AmazonSkb::NAME, PrimeSkb::NAME, MagSkb::NAME];

struct RegistryEntry {
    name: String,
    factory: Box<dyn KnowledgeBaseFactory>,

    /// Constructed at most once, on first successful resolution.
    instance: OnceCell<SharedKnowledgeBase>,
}

/// An unpopulated registry accepting registrations.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<RegistryEntry>,
}

impl RegistryBuilder {
    /// Start an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`.
    ///
    /// Fails with [`SkbError::DuplicateName`] if the name is taken.
    pub fn register(
        mut self,
        name: impl Into<String>,
        factory: impl KnowledgeBaseFactory + 'static,
    ) -> SkbResult<Self> {
        let name = name.into();
        if self.entries.iter().any(|e| e.name == name) {
            return Err(SkbError::DuplicateName(name));
        }

        self.entries.push(RegistryEntry {
            name,
            factory: Box::new(factory),
            instance: OnceCell::new(),
        });
        Ok(self)
    }

    /// Freeze the entry set.
    pub fn build(self) -> Registry {
        let index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.name.clone(), pos))
            .collect();

        Registry {
            entries: self.entries,
            index,
        }
    }
}

/// A populated, immutable registry of knowledge bases.
pub struct Registry {
    /// Entries in registration order.
    entries: Vec<RegistryEntry>,

    /// Index: name -> position in `entries`.
    index: HashMap<String, usize>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The standard registry: `amazon`, `prime`, and `mag`, each loading its
    /// snapshot as located by `config`.
    pub fn with_defaults(config: SkbConfig) -> SkbResult<Self> {
        let config = Arc::new(config);

        let registry = Self::builder()
            .register(AmazonSkb::NAME, config_factory(Arc::clone(&config), AmazonSkb::load))?
            .register(PrimeSkb::NAME, config_factory(Arc::clone(&config), PrimeSkb::load))?
            .register(MagSkb::NAME, config_factory(config, MagSkb::load))?
            .build();
        Ok(registry)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Check if the knowledge base for `name` has been constructed.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.entry(name)
            .map(|e| e.instance.get().is_some())
            .unwrap_or(false)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a name to its knowledge base, constructing it on first use.
    ///
    /// Concurrent first resolutions of one name wait for a single
    /// construction. A failed construction is not cached; the next call
    /// retries the factory.
    pub fn resolve(&self, name: &str) -> SkbResult<SharedKnowledgeBase> {
        let entry = self.entry(name).ok_or_else(|| SkbError::UnknownName {
            name: name.to_string(),
            known: self.names().into_iter().map(str::to_string).collect(),
        })?;

        if let Some(kb) = entry.instance.get() {
            tracing::debug!(name = %entry.name, "Knowledge base already loaded");
            return Ok(Arc::clone(kb));
        }

        let kb = entry.instance.get_or_try_init(|| {
            tracing::info!(name = %entry.name, "Constructing knowledge base");
            let kb = entry.factory.create().map_err(|err| {
                tracing::warn!(name = %entry.name, error = %err, "Failed to construct knowledge base");
                err
            })?;
            if kb.name() != entry.name {
                tracing::warn!(
                    name = %entry.name,
                    instance = %kb.name(),
                    "Knowledge base reports a different name than its registry key"
                );
            }
            Ok::<_, SkbError>(kb)
        })?;

        Ok(Arc::clone(kb))
    }

    fn entry(&self, name: &str) -> Option<&RegistryEntry> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loaded: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.instance.get().is_some())
            .map(|e| e.name.as_str())
            .collect();

        f.debug_struct("Registry")
            .field("names", &self.names())
            .field("loaded", &loaded)
            .finish()
    }
}
