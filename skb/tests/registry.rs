//! End-to-end tests: snapshots on disk, resolved through the default
//! registry, queried and evaluated.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use skb::{
    mean_scores, DocOptions, Entity, EntityId, Evaluator, KnowledgeBase, Metric, Predictions,
    Registry, Relation, SkbConfig, SkbError, SkbSnapshot, REGISTERED_SKBS,
};

fn write_datasets(dir: &Path) -> SkbConfig {
    let config = SkbConfig::with_data_dir(dir);

    SkbSnapshot {
        entities: vec![
            Entity::new(EntityId(0), "product").with_attribute("title", "Tent"),
            Entity::new(EntityId(1), "product").with_attribute("title", "Stove"),
            Entity::new(EntityId(2), "brand").with_attribute("title", "Acme"),
        ],
        relations: vec![
            Relation::new(EntityId(0), "has_brand", EntityId(2)),
            Relation::new(EntityId(1), "has_brand", EntityId(2)),
            Relation::new(EntityId(0), "also_buy", EntityId(1)),
        ],
    }
    .write(config.snapshot_path("amazon"))
    .unwrap();

    SkbSnapshot {
        entities: vec![
            Entity::new(EntityId(0), "disease").with_attribute("name", "asthma"),
            Entity::new(EntityId(1), "drug").with_attribute("name", "albuterol"),
        ],
        relations: vec![Relation::new(EntityId(1), "indication", EntityId(0))],
    }
    .write(config.snapshot_path("prime"))
    .unwrap();

    SkbSnapshot {
        entities: vec![
            Entity::new(EntityId(0), "paper").with_attribute("title", "On Graphs"),
            Entity::new(EntityId(1), "author").with_attribute("title", "Ada"),
        ],
        relations: vec![Relation::new(EntityId(1), "writes", EntityId(0))],
    }
    .write(config.snapshot_path("mag"))
    .unwrap();

    config
}

#[test]
fn every_registered_name_resolves_to_itself() {
    let dir = tempfile::TempDir::new().unwrap();
    let registry = Registry::with_defaults(write_datasets(dir.path())).unwrap();

    let names: HashSet<_> = registry.names().into_iter().collect();
    assert_eq!(names, REGISTERED_SKBS.into_iter().collect());

    for name in REGISTERED_SKBS {
        let kb = registry.resolve(name).unwrap();
        assert_eq!(kb.name(), name);

        for id in kb.entity_ids() {
            assert_eq!(kb.get_entity(id).unwrap().id, id);
        }
        assert!(matches!(
            kb.get_entity(EntityId(1_000)),
            Err(SkbError::NotFound(EntityId(1_000)))
        ));
    }
}

#[test]
fn resolve_is_cached() {
    let dir = tempfile::TempDir::new().unwrap();
    let registry = Registry::with_defaults(write_datasets(dir.path())).unwrap();

    let first = registry.resolve("mag").unwrap();
    let second = registry.resolve("mag").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(!registry.is_loaded("prime"));
}

#[test]
fn unknown_name_fails() {
    let registry = Registry::with_defaults(SkbConfig::default()).unwrap();
    assert!(matches!(
        registry.resolve("nonexistent"),
        Err(SkbError::UnknownName { .. })
    ));
}

#[test]
fn missing_snapshot_surfaces_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let registry = Registry::with_defaults(SkbConfig::with_data_dir(dir.path())).unwrap();

    assert!(matches!(registry.resolve("amazon"), Err(SkbError::Io { .. })));
    assert!(!registry.is_loaded("amazon"));
}

#[test]
fn variants_shape_candidates_and_documents() {
    let dir = tempfile::TempDir::new().unwrap();
    let registry = Registry::with_defaults(write_datasets(dir.path())).unwrap();

    let amazon = registry.resolve("amazon").unwrap();
    assert_eq!(amazon.candidate_ids(), vec![EntityId(0), EntityId(1)]);
    assert_eq!(amazon.neighbors(EntityId(0), Some("has_brand")), vec![EntityId(2)]);
    assert_eq!(
        amazon
            .doc_info(EntityId(0), DocOptions::with_relations().compact(true))
            .unwrap(),
        "type: product; title: Tent; also_buy: Stove; has_brand: Acme"
    );

    let prime = registry.resolve("prime").unwrap();
    assert_eq!(prime.candidate_ids().len(), 2);
    assert!(prime
        .doc_info(EntityId(1), DocOptions::with_relations())
        .unwrap()
        .contains("  indication: asthma\n"));

    let mag = registry.resolve("mag").unwrap();
    assert_eq!(mag.candidate_ids(), vec![EntityId(0)]);
    assert!(mag.relations_for(EntityId(0)).is_empty());
}

#[test]
fn evaluate_over_resolved_candidates() {
    let dir = tempfile::TempDir::new().unwrap();
    let registry = Registry::with_defaults(write_datasets(dir.path())).unwrap();
    let amazon = registry.resolve("amazon").unwrap();

    let evaluator = Evaluator::for_knowledge_base(amazon.as_ref()).unwrap();
    let metrics: Vec<Metric> = ["mrr", "hit@1", "ndcg@2"]
        .iter()
        .map(|m| m.parse().unwrap())
        .collect();

    let good: Predictions = [(EntityId(1), 0.9), (EntityId(0), 0.1)].into_iter().collect();
    let bad: Predictions = [(EntityId(0), 0.9), (EntityId(1), 0.1)].into_iter().collect();
    let results = evaluator
        .evaluate_batch(&[good, bad], &[vec![EntityId(1)], vec![EntityId(1)]], &metrics)
        .unwrap();

    assert_eq!(results[0]["mrr"], 1.0);
    assert_eq!(results[1]["hit@1"], 0.0);

    let mean = mean_scores(&results);
    assert!((mean["mrr"] - 0.75).abs() < 1e-9);
    assert!((mean["hit@1"] - 0.5).abs() < 1e-9);
}
