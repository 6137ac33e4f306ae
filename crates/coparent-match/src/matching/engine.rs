use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::domain::ProfileRecord;
use super::factors::{MatchFactors, Score};
use super::normalize::{normalize_candidate, normalize_viewer, CanonicalProfile};
use super::weights::FactorKind;

/// Stateless scorer combining the factor breakdown into one percentage.
///
/// Ages derived from birth dates are computed against `reference_date`, or
/// the local calendar date when none is pinned.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityEngine {
    reference_date: Option<NaiveDate>,
}

impl CompatibilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            reference_date: Some(reference_date),
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn score(
        &self,
        viewer: Option<&ProfileRecord>,
        candidate: &ProfileRecord,
    ) -> CompatibilityOutcome {
        let today = self.reference_date();
        let viewer = viewer.map(|record| normalize_viewer(record, today));
        self.score_with_viewer(viewer.as_ref(), candidate, today)
    }

    /// Score against an already-normalized viewer so batches normalize it once.
    pub(crate) fn score_with_viewer(
        &self,
        viewer: Option<&CanonicalProfile>,
        candidate: &ProfileRecord,
        today: NaiveDate,
    ) -> CompatibilityOutcome {
        let Some(viewer) = viewer else {
            debug!("no viewer profile; compatibility is 0");
            return CompatibilityOutcome::without_viewer();
        };

        let candidate = normalize_candidate(candidate, today);
        let factors = MatchFactors::evaluate(viewer, &candidate);
        let outcome = CompatibilityOutcome::from_factors(factors);

        debug!(
            score = outcome.score,
            evaluated = factors.evaluated_count(),
            "scored candidate"
        );
        outcome
    }
}

/// Weighted contribution of one evaluated factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorContribution {
    pub factor: FactorKind,
    pub score: Score,
    pub weight: f64,
    /// Share of the final percentage after renormalizing over evaluated factors.
    pub effective_weight: f64,
}

/// Compatibility result with the breakdown that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityOutcome {
    pub score: u8,
    pub factors: MatchFactors,
    pub contributions: Vec<FactorContribution>,
}

impl CompatibilityOutcome {
    pub fn without_viewer() -> Self {
        Self {
            score: 0,
            factors: MatchFactors::default(),
            contributions: Vec::new(),
        }
    }

    pub fn from_factors(factors: MatchFactors) -> Self {
        let (total_score, total_weight) = weighted_totals(&factors);

        let contributions = factors
            .entries()
            .filter_map(|(factor, score)| {
                score.map(|score| FactorContribution {
                    factor,
                    score,
                    weight: factor.weight(),
                    effective_weight: factor.weight() / total_weight,
                })
            })
            .collect();

        Self {
            score: percentage(total_score, total_weight),
            factors,
            contributions,
        }
    }
}

/// Folds evaluated factors into `(weighted score, weight)`; unevaluated factors add nothing.
///
/// Scores are accumulated as fractions of 1 so the ratio of the two totals is
/// itself a fraction.
pub fn weighted_totals(factors: &MatchFactors) -> (f64, f64) {
    factors
        .entries()
        .fold((0.0, 0.0), |(total, weight_sum), (factor, score)| match score {
            Some(score) => {
                let weight = factor.weight();
                (total + score.fraction() * weight, weight_sum + weight)
            }
            None => (total, weight_sum),
        })
}

/// Final integer percentage; rounds half away from zero.
pub fn percentage(total_score: f64, total_weight: f64) -> u8 {
    if total_weight <= 0.0 {
        return 0;
    }

    let raw = (total_score / total_weight) * 100.0;
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

/// Compatibility percentage of `candidate` from the viewer's perspective.
///
/// A missing viewer scores 0.
pub fn compute_compatibility(viewer: Option<&ProfileRecord>, candidate: &ProfileRecord) -> u8 {
    CompatibilityEngine::new().score(viewer, candidate).score
}

/// Same as [`compute_compatibility`] with ages derived as of `today`.
pub fn compute_compatibility_on(
    viewer: Option<&ProfileRecord>,
    candidate: &ProfileRecord,
    today: NaiveDate,
) -> u8 {
    CompatibilityEngine::with_reference_date(today)
        .score(viewer, candidate)
        .score
}
