//! Ranking metrics over a relevance-ordered candidate list.

use std::fmt;
use std::str::FromStr;

use skb_core::SkbError;

/// Metrics reported by a standard evaluation run.
pub const DEFAULT_METRICS: &[&str] = &[
    "mrr",
    "map",
    "rprecision",
    "recall@5",
    "recall@10",
    "recall@20",
    "recall@50",
    "recall@100",
    "hit@1",
    "hit@3",
    "hit@5",
    "hit@10",
    "hit@20",
    "hit@50",
];

/// A retrieval metric. `None` cut-offs cover the whole ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    /// Reciprocal rank of the first relevant candidate.
    Mrr,
    /// Precision at R, where R is the number of relevant candidates.
    RPrecision,
    /// 1.0 if any relevant candidate is in the top k.
    Hit(Option<usize>),
    /// Share of relevant candidates found in the top k.
    Recall(Option<usize>),
    /// Share of the top k that is relevant.
    Precision(Option<usize>),
    /// Average precision over the relevant candidates in the top k.
    Map(Option<usize>),
    /// Normalized discounted cumulative gain at k.
    Ndcg(Option<usize>),
}

impl Metric {
    /// Score a ranking given as relevance flags in rank order.
    ///
    /// Rankings without any relevant candidate score 0.
    pub fn score(&self, ranked: &[bool]) -> f64 {
        let relevant = ranked.iter().filter(|r| **r).count();
        if relevant == 0 {
            return 0.0;
        }

        let top = |k: Option<usize>| cut(ranked, k);
        let hits = |slice: &[bool]| slice.iter().filter(|r| **r).count() as f64;

        match *self {
            Metric::Mrr => ranked
                .iter()
                .position(|r| *r)
                .map(|pos| 1.0 / (pos + 1) as f64)
                .unwrap_or(0.0),
            Metric::RPrecision => hits(top(Some(relevant))) / relevant as f64,
            Metric::Hit(k) => {
                if top(k).contains(&true) {
                    1.0
                } else {
                    0.0
                }
            }
            Metric::Recall(k) => hits(top(k)) / relevant as f64,
            Metric::Precision(k) => hits(top(k)) / k.unwrap_or(ranked.len()) as f64,
            Metric::Map(k) => {
                let precisions: Vec<f64> = top(k)
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| **r)
                    .enumerate()
                    .map(|(found, (pos, _))| (found + 1) as f64 / (pos + 1) as f64)
                    .collect();
                if precisions.is_empty() {
                    0.0
                } else {
                    precisions.iter().sum::<f64>() / precisions.len() as f64
                }
            }
            Metric::Ndcg(k) => {
                let dcg = discounted_gain(top(k));
                let mut ideal = ranked.to_vec();
                ideal.sort_by(|a, b| b.cmp(a));
                let idcg = discounted_gain(&ideal[..top(k).len()]);
                if idcg == 0.0 {
                    0.0
                } else {
                    dcg / idcg
                }
            }
        }
    }
}

/// The first `k` entries of a ranking, or all of it.
fn cut(ranked: &[bool], k: Option<usize>) -> &[bool] {
    &ranked[..k.unwrap_or(ranked.len()).min(ranked.len())]
}

fn discounted_gain(ranked: &[bool]) -> f64 {
    ranked
        .iter()
        .enumerate()
        .filter(|(_, r)| **r)
        .map(|(pos, _)| 1.0 / ((pos + 2) as f64).log2())
        .sum()
}

impl FromStr for Metric {
    type Err = SkbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SkbError::UnknownMetric(s.to_string());

        let (base, k) = match s.split_once('@') {
            Some((base, k)) => match k.parse::<usize>() {
                Ok(k) if k > 0 => (base, Some(k)),
                _ => return Err(unknown()),
            },
            None => (s, None),
        };

        match (base, k) {
            ("mrr", None) => Ok(Metric::Mrr),
            ("rprecision", None) => Ok(Metric::RPrecision),
            ("hit", k) => Ok(Metric::Hit(k)),
            ("recall", k) => Ok(Metric::Recall(k)),
            ("precision", k) => Ok(Metric::Precision(k)),
            ("map", k) => Ok(Metric::Map(k)),
            ("ndcg", k) => Ok(Metric::Ndcg(k)),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (base, k) = match *self {
            Metric::Mrr => ("mrr", None),
            Metric::RPrecision => ("rprecision", None),
            Metric::Hit(k) => ("hit", k),
            Metric::Recall(k) => ("recall", k),
            Metric::Precision(k) => ("precision", k),
            Metric::Map(k) => ("map", k),
            Metric::Ndcg(k) => ("ndcg", k),
        };
        match k {
            Some(k) => write!(f, "{base}@{k}"),
            None => f.write_str(base),
        }
    }
}
