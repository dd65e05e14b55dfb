//! Text documents rendered from entities, used for indexing and embedding.

use std::collections::BTreeMap;

use super::KnowledgeBase;
use crate::entities::{Entity, EntityId};
use crate::error::SkbResult;

/// Attribute used as the title when a knowledge base does not choose one.
pub const DEFAULT_TITLE_ATTRIBUTE: &str = "title";

/// Options for [`KnowledgeBase::doc_info`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocOptions {
    /// Append the entity's outgoing relations.
    pub add_rel: bool,

    /// Put every field on a single line.
    pub compact: bool,
}

impl DocOptions {
    /// Full document with relations.
    pub fn with_relations() -> Self {
        Self {
            add_rel: true,
            compact: false,
        }
    }

    /// Set compact rendering.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}

/// Render the document for `id`.
///
/// The node type comes first, then the title attribute, then the remaining
/// attributes in name order. With `add_rel`, relation targets are listed by
/// title, grouped per relation type.
pub fn render_doc<K>(kb: &K, id: EntityId, options: DocOptions) -> SkbResult<String>
where
    K: KnowledgeBase + ?Sized,
{
    let entity = kb.get_entity(id)?;
    let title_key = kb.title_attribute();

    let mut fields: Vec<(String, String)> = vec![("type".into(), entity.node_type.clone())];
    if let Some(title) = entity.attribute_text(title_key) {
        fields.push((title_key.to_string(), title));
    }
    for name in entity.attributes.keys().filter(|k| k.as_str() != title_key) {
        if let Some(text) = entity.attribute_text(name) {
            fields.push((name.clone(), text));
        }
    }

    let mut groups: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    if options.add_rel {
        for rel in kb.relations_for(id) {
            let label = match kb.get_entity(rel.target) {
                Ok(target) => display_title(target, title_key),
                Err(_) => format!("#{}", rel.target),
            };
            groups.entry(rel.relation.as_str()).or_default().push(label);
        }
    }

    if options.compact {
        let mut parts: Vec<String> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        parts.extend(groups.iter().map(|(rel, targets)| format!("{rel}: {}", targets.join(", "))));
        return Ok(parts.join("; "));
    }

    let mut doc = String::new();
    for (key, value) in &fields {
        doc.push_str(&format!("- {key}: {value}\n"));
    }
    if !groups.is_empty() {
        doc.push_str("- relations:\n");
        for (rel, targets) in &groups {
            doc.push_str(&format!("  {rel}: {}\n", targets.join(", ")));
        }
    }
    Ok(doc)
}

fn display_title(entity: &Entity, title_key: &str) -> String {
    entity
        .attribute_text(title_key)
        .unwrap_or_else(|| format!("#{}", entity.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Relation;
    use crate::store::{Skb, SkbBuilder};
    use crate::SkbError;

    fn shop() -> Skb {
        SkbBuilder::new("shop")
            .entity(
                Entity::new(EntityId(0), "product")
                    .with_attribute("title", "Trail Shoe")
                    .with_attribute("price", 89.5)
                    .with_attribute("color", serde_json::json!(["red", "black"])),
            )
            .entity(Entity::new(EntityId(1), "brand").with_attribute("title", "Acme"))
            .entity(Entity::new(EntityId(2), "product"))
            .relation(Relation::new(EntityId(0), "has_brand", EntityId(1)))
            .relation(Relation::new(EntityId(0), "also_buy", EntityId(2)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_doc_without_relations() {
        let doc = shop().doc_info(EntityId(0), DocOptions::default()).unwrap();
        assert_eq!(
            doc,
            "- type: product\n- title: Trail Shoe\n- color: red, black\n- price: 89.5\n"
        );
    }

    #[test]
    fn test_doc_with_relations() {
        let doc = shop().doc_info(EntityId(0), DocOptions::with_relations()).unwrap();
        assert!(doc.ends_with("- relations:\n  also_buy: #2\n  has_brand: Acme\n"));
    }

    #[test]
    fn test_compact_doc() {
        let doc = shop()
            .doc_info(EntityId(0), DocOptions::with_relations().compact(true))
            .unwrap();
        assert_eq!(
            doc,
            "type: product; title: Trail Shoe; color: red, black; price: 89.5; also_buy: #2; has_brand: Acme"
        );
    }

    #[test]
    fn test_doc_missing_entity() {
        let err = shop().doc_info(EntityId(7), DocOptions::default()).unwrap_err();
        assert!(matches!(err, SkbError::NotFound(EntityId(7))));
    }
}
