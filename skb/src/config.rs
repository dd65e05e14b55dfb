//! Configuration for locating and shaping knowledge base datasets.
//!
//! Loaded from TOML:
//!
//! ```toml
//! data_dir = "/srv/skb"
//!
//! [datasets.amazon]
//! path = "/srv/skb/amazon-2024.json"
//!
//! [datasets.prime]
//! candidate_type = "disease"
//! title_attribute = "name"
//!
//! [eval]
//! metrics = ["mrr", "hit@1", "recall@20"]
//! save_topk = 100
//! ```
//!
//! Every field is optional. Snapshots default to `<data_dir>/<name>/skb.json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use skb_core::{SkbError, SkbResult};

use crate::evaluation::{Metric, DEFAULT_METRICS};

/// File name of a dataset snapshot inside its directory.
pub const SNAPSHOT_FILE: &str = "skb.json";

/// Candidate type value meaning "every entity is a candidate".
pub const ALL_CANDIDATES: &str = "*";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkbConfig {
    /// Directory holding one sub-directory per dataset.
    pub data_dir: PathBuf,

    /// Per-dataset overrides keyed by registry name.
    pub datasets: BTreeMap<String, DatasetConfig>,

    pub eval: EvalConfig,
}

impl Default for SkbConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            datasets: BTreeMap::new(),
            eval: EvalConfig::default(),
        }
    }
}

impl SkbConfig {
    /// Create a default configuration rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> SkbResult<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Read configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> SkbResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SkbError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Overrides for a dataset (defaults if none are configured).
    pub fn dataset(&self, name: &str) -> DatasetConfig {
        self.datasets.get(name).cloned().unwrap_or_default()
    }

    /// Where the snapshot for `name` lives.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.datasets
            .get(name)
            .and_then(|d| d.path.clone())
            .unwrap_or_else(|| self.data_dir.join(name).join(SNAPSHOT_FILE))
    }
}

/// Overrides for a single dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Explicit snapshot path.
    pub path: Option<PathBuf>,

    /// Node type of retrieval candidates, or `"*"` for every entity.
    pub candidate_type: Option<String>,

    /// Attribute used as the entity title in documents.
    pub title_attribute: Option<String>,
}

/// Evaluation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Metric names, e.g. `"mrr"` or `"recall@20"`.
    pub metrics: Vec<String>,

    /// Number of top-ranked ids kept per query.
    pub save_topk: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            metrics: DEFAULT_METRICS.iter().map(|m| m.to_string()).collect(),
            save_topk: 500,
        }
    }
}

impl EvalConfig {
    /// Parse the configured metric names.
    pub fn parsed_metrics(&self) -> SkbResult<Vec<Metric>> {
        self.metrics.iter().map(|m| m.parse()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SkbConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.snapshot_path("mag"), PathBuf::from("data/mag/skb.json"));
        assert_eq!(config.eval.save_topk, 500);
        assert_eq!(config.eval.parsed_metrics().unwrap().len(), DEFAULT_METRICS.len());
    }

    #[test]
    fn test_parse_toml() {
        let config = SkbConfig::from_toml_str(
            r#"
            data_dir = "/srv/skb"

            [datasets.amazon]
            path = "/tmp/amazon.json"

            [datasets.prime]
            candidate_type = "disease"

            [eval]
            metrics = ["mrr", "hit@3"]
            "#,
        )
        .unwrap();

        assert_eq!(config.snapshot_path("amazon"), PathBuf::from("/tmp/amazon.json"));
        assert_eq!(config.snapshot_path("prime"), PathBuf::from("/srv/skb/prime/skb.json"));
        assert_eq!(config.dataset("prime").candidate_type.as_deref(), Some("disease"));
        assert_eq!(config.dataset("mag"), DatasetConfig::default());
        assert_eq!(
            config.eval.parsed_metrics().unwrap(),
            vec![Metric::Mrr, Metric::Hit(Some(3))]
        );
        assert_eq!(config.eval.save_topk, 500);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SkbConfig::from_toml_str("data_dir = 3"),
            Err(SkbError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_metric_in_config() {
        let config = SkbConfig::from_toml_str("[eval]\nmetrics = [\"f1\"]").unwrap();
        assert!(matches!(
            config.eval.parsed_metrics(),
            Err(SkbError::UnknownMetric(m)) if m == "f1"
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("skb.toml");
        std::fs::write(&path, "data_dir = \"datasets\"").unwrap();

        let config = SkbConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("datasets"));
    }
}
