//! Dataset variants - the named knowledge bases a registry can resolve.
//!
//! Each variant wraps a generic [`Skb`] loaded from its snapshot and adds a
//! [`VariantProfile`] deciding which entities are retrieval candidates and
//! which attribute titles its documents.

use skb_core::{EntityId, KnowledgeBase, Skb, SkbResult};

use crate::config::{DatasetConfig, SkbConfig, ALL_CANDIDATES};

/// Per-dataset shaping of a generic knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantProfile {
    /// Node type of retrieval candidates; `None` means every entity.
    pub candidate_type: Option<String>,

    /// Attribute used as the document title.
    pub title_attribute: String,
}

impl VariantProfile {
    /// Create a profile.
    pub fn new(candidate_type: Option<&str>, title_attribute: &str) -> Self {
        Self {
            candidate_type: candidate_type.map(str::to_string),
            title_attribute: title_attribute.to_string(),
        }
    }

    /// Apply configured overrides on top of this profile.
    pub fn with_overrides(mut self, dataset: &DatasetConfig) -> Self {
        if let Some(candidate_type) = &dataset.candidate_type {
            self.candidate_type = if candidate_type == ALL_CANDIDATES {
                None
            } else {
                Some(candidate_type.clone())
            };
        }
        if let Some(title) = &dataset.title_attribute {
            self.title_attribute = title.clone();
        }
        self
    }

    /// Candidate ids of `skb` under this profile, in load order.
    pub fn candidate_ids(&self, skb: &Skb) -> Vec<EntityId> {
        match &self.candidate_type {
            Some(node_type) => skb.entities_of_type(node_type).map(|e| e.id).collect(),
            None => skb.entity_ids().collect(),
        }
    }
}

/// Load the configured snapshot for `name` and resolve its profile.
pub(crate) fn load_dataset(
    name: &str,
    profile: VariantProfile,
    config: &SkbConfig,
) -> SkbResult<(Skb, VariantProfile)> {
    let path = config.snapshot_path(name);
    let skb = Skb::load(name, &path)?;
    Ok((skb, profile.with_overrides(&config.dataset(name))))
}

/// Define a dataset variant: a named wrapper around [`Skb`] with a default
/// profile, delegating the [`KnowledgeBase`] contract to the wrapped store.
macro_rules! dataset_variant {
    (
        $(#[$meta:meta])*
        $ty:ident, $name:literal, candidates = $candidates:expr, title = $title:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $ty {
            skb: skb_core::Skb,
            profile: $crate::variants::VariantProfile,
        }

        impl $ty {
            /// Registry key of this dataset.
            pub const NAME: &'static str = $name;

            /// Profile used when configuration has no overrides.
            pub fn default_profile() -> $crate::variants::VariantProfile {
                $crate::variants::VariantProfile::new($candidates, $title)
            }

            /// Wrap an already loaded store with the default profile.
            pub fn new(skb: skb_core::Skb) -> Self {
                Self::with_profile(skb, Self::default_profile())
            }

            /// Wrap an already loaded store with an explicit profile.
            pub fn with_profile(skb: skb_core::Skb, profile: $crate::variants::VariantProfile) -> Self {
                Self { skb, profile }
            }

            /// Load the dataset snapshot located by `config`.
            pub fn load(config: &$crate::config::SkbConfig) -> skb_core::SkbResult<Self> {
                let (skb, profile) =
                    $crate::variants::load_dataset(Self::NAME, Self::default_profile(), config)?;
                Ok(Self { skb, profile })
            }

            /// The wrapped store.
            pub fn skb(&self) -> &skb_core::Skb {
                &self.skb
            }

            pub fn profile(&self) -> &$crate::variants::VariantProfile {
                &self.profile
            }
        }

        impl skb_core::KnowledgeBase for $ty {
            fn name(&self) -> &str {
                Self::NAME
            }

            fn get_entity(&self, id: skb_core::EntityId) -> skb_core::SkbResult<&skb_core::Entity> {
                skb_core::KnowledgeBase::get_entity(&self.skb, id)
            }

            fn entity_ids(&self) -> skb_core::EntityIds<'_> {
                skb_core::KnowledgeBase::entity_ids(&self.skb)
            }

            fn relations_for(&self, id: skb_core::EntityId) -> &[skb_core::Relation] {
                skb_core::KnowledgeBase::relations_for(&self.skb, id)
            }

            fn entity_count(&self) -> usize {
                skb_core::KnowledgeBase::entity_count(&self.skb)
            }

            fn relation_count(&self) -> usize {
                skb_core::KnowledgeBase::relation_count(&self.skb)
            }

            fn contains(&self, id: skb_core::EntityId) -> bool {
                skb_core::KnowledgeBase::contains(&self.skb, id)
            }

            fn candidate_ids(&self) -> Vec<skb_core::EntityId> {
                self.profile.candidate_ids(&self.skb)
            }

            fn title_attribute(&self) -> &str {
                &self.profile.title_attribute
            }
        }
    };
}

mod amazon;
mod mag;
mod prime;

pub use amazon::*;
pub use mag::*;
pub use prime::*;
