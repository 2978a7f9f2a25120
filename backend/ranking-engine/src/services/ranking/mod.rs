//! Weighted-sum scoring core and the generic ranking wrapper shared by
//! every model in the engine.

use crate::error::{EngineError, Result};
use crate::models::{Ranked, RankedList, ScoreResult, WeightedFeature};
use tracing::{debug, warn};

/// Tolerance for the weight-sum invariant of registered models.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Check that a model's weight table sums to 1.0. Runs once at engine
/// construction, never per scoring call.
pub fn validate_weights(model: &'static str, weights: &[f64]) -> Result<()> {
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(EngineError::InvalidWeights { model, sum });
    }
    Ok(())
}

/// Compute `Σ value·weight` over the breakdown, clamped to [0, 100].
pub fn weighted_sum(subject_id: impl Into<String>, features: Vec<WeightedFeature>) -> ScoreResult {
    let raw: f64 = features.iter().map(|f| f.value * f.weight).sum();

    ScoreResult {
        subject_id: subject_id.into(),
        score: raw.clamp(0.0, 100.0),
        breakdown: features,
    }
}

/// Score every candidate and sort descending by score.
///
/// The sort is stable: equal scores keep their input order, so repeated runs
/// over unchanged input never reshuffle tied items between UI refreshes.
/// A candidate whose scoring fails is dropped from the output and logged;
/// partial results are preferred over failing the whole call. Top-N
/// truncation is the caller's job.
pub fn rank<T, F>(candidates: Vec<T>, score_fn: F) -> RankedList<T>
where
    F: Fn(&T) -> Result<ScoreResult>,
{
    let mut ranked = score_all(candidates, score_fn);

    // Note: NaN scores are treated as equal so the stable order holds
    ranked.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    log_ranked(&ranked);
    ranked
}

/// Like [`rank`], but ties are broken by a caller-supplied deterministic
/// secondary key (ascending) instead of input order. Candidates tied on
/// both score and key still keep their input order.
pub fn rank_with_tie_break<T, F, K, G>(
    candidates: Vec<T>,
    score_fn: F,
    key_fn: G,
) -> RankedList<T>
where
    F: Fn(&T) -> Result<ScoreResult>,
    K: Ord,
    G: Fn(&T) -> K,
{
    let mut ranked = score_all(candidates, score_fn);

    ranked.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| key_fn(&a.item).cmp(&key_fn(&b.item)))
    });

    log_ranked(&ranked);
    ranked
}

fn score_all<T, F>(candidates: Vec<T>, score_fn: F) -> RankedList<T>
where
    F: Fn(&T) -> Result<ScoreResult>,
{
    let mut scored: RankedList<T> = Vec::with_capacity(candidates.len());

    for item in candidates {
        match score_fn(&item) {
            Ok(result) => scored.push(Ranked { item, result }),
            Err(err) => warn!("Dropping candidate from ranking: {}", err),
        }
    }

    scored
}

fn log_ranked<T>(ranked: &RankedList<T>) {
    debug!(
        ranked = ranked.len(),
        top_score = ranked.first().map(|r| r.result.score),
        "Ranking complete"
    );
}
