//! Evaluator - scores ranked retrieval predictions against answer sets.
//!
//! Scoring works over a fixed candidate set:
//! 1. **Fill**: candidates without a prediction score `min(prediction) - 1`
//! 2. **Rank**: candidates sorted by descending score, ties in candidate order
//! 3. **Judge**: each ranked candidate is flagged relevant if it is an answer
//! 4. **Measure**: every requested [`Metric`] is computed on the flags

mod metric;

pub use metric::*;

use std::collections::{BTreeMap, HashMap, HashSet};

use skb_core::{EntityId, KnowledgeBase, SkbError, SkbResult};

/// Predicted relevance score per entity.
pub type Predictions = HashMap<EntityId, f64>;

/// Metric name -> value, as reported for one query or averaged over many.
pub type MetricScores = BTreeMap<String, f64>;

/// Scores predictions over a fixed set of candidate ids.
#[derive(Debug, Clone)]
pub struct Evaluator {
    candidate_ids: Vec<EntityId>,
}

impl Evaluator {
    /// Create an evaluator over the given candidates.
    pub fn new(candidate_ids: Vec<EntityId>) -> SkbResult<Self> {
        if candidate_ids.is_empty() {
            return Err(SkbError::EmptyCandidates);
        }
        Ok(Self { candidate_ids })
    }

    /// Create an evaluator over a knowledge base's candidate set.
    pub fn for_knowledge_base<K>(kb: &K) -> SkbResult<Self>
    where
        K: KnowledgeBase + ?Sized,
    {
        Self::new(kb.candidate_ids())
    }

    /// The candidate ids, in candidate order.
    pub fn candidate_ids(&self) -> &[EntityId] {
        &self.candidate_ids
    }

    /// Rank every candidate by predicted score, highest first.
    ///
    /// Predictions for ids outside the candidate set are ignored.
    pub fn rank(&self, pred: &Predictions) -> Vec<(EntityId, f64)> {
        let floor = pred
            .values()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let fill = if floor.is_finite() { floor - 1.0 } else { 0.0 };

        let mut ranked: Vec<_> = self
            .candidate_ids
            .iter()
            .map(|id| (*id, pred.get(id).copied().unwrap_or(fill)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// The `k` best ranked candidate ids.
    pub fn top_k(&self, pred: &Predictions, k: usize) -> Vec<EntityId> {
        self.rank(pred).into_iter().take(k).map(|(id, _)| id).collect()
    }

    /// Evaluate one query.
    pub fn evaluate(&self, pred: &Predictions, answer_ids: &[EntityId], metrics: &[Metric]) -> MetricScores {
        let answers: HashSet<_> = answer_ids.iter().copied().collect();
        let relevance: Vec<bool> = self
            .rank(pred)
            .into_iter()
            .map(|(id, _)| answers.contains(&id))
            .collect();

        metrics
            .iter()
            .map(|metric| (metric.to_string(), metric.score(&relevance)))
            .collect()
    }

    /// Evaluate many queries; `preds[i]` is scored against `answer_ids[i]`.
    pub fn evaluate_batch(
        &self,
        preds: &[Predictions],
        answer_ids: &[Vec<EntityId>],
        metrics: &[Metric],
    ) -> SkbResult<Vec<MetricScores>> {
        if preds.len() != answer_ids.len() {
            return Err(SkbError::BatchMismatch {
                predictions: preds.len(),
                answers: answer_ids.len(),
            });
        }

        tracing::debug!(
            queries = preds.len(),
            candidates = self.candidate_ids.len(),
            metrics = metrics.len(),
            "Evaluating batch"
        );

        Ok(preds
            .iter()
            .zip(answer_ids)
            .map(|(pred, answers)| self.evaluate(pred, answers, metrics))
            .collect())
    }
}

/// Average each metric over a set of per-query results.
///
/// Metrics missing from some results are averaged over the results that
/// report them.
pub fn mean_scores(results: &[MetricScores]) -> MetricScores {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for scores in results {
        for (metric, value) in scores {
            let entry = sums.entry(metric.clone()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(metric, (sum, count))| (metric, sum / count as f64))
        .collect()
}
