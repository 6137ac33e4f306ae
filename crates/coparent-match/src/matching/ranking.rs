use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{ProfileEntry, ProfileId, ProfileRecord};
use super::engine::CompatibilityEngine;
use super::normalize::normalize_viewer;

/// Filters applied when ordering candidates for a viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOptions {
    /// Drop candidates scoring below this percentage.
    pub min_score: Option<u8>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: ProfileId,
    pub score: u8,
}

impl CompatibilityEngine {
    /// Score every candidate and order them best first; ties keep id order.
    pub fn rank<'a, I>(
        &self,
        viewer: Option<&ProfileRecord>,
        candidates: I,
        options: RankOptions,
    ) -> Vec<RankedCandidate>
    where
        I: IntoIterator<Item = (&'a ProfileId, &'a ProfileRecord)>,
    {
        let today = self.reference_date();
        let viewer = viewer.map(|record| normalize_viewer(record, today));

        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .map(|(id, record)| RankedCandidate {
                id: id.clone(),
                score: self
                    .score_with_viewer(viewer.as_ref(), record, today)
                    .score,
            })
            .filter(|candidate| {
                options
                    .min_score
                    .map_or(true, |minimum| candidate.score >= minimum)
            })
            .collect();

        ranked.sort_by(|left, right| {
            right
                .score
                .cmp(&left.score)
                .then_with(|| left.id.cmp(&right.id))
        });

        if let Some(limit) = options.limit {
            ranked.truncate(limit);
        }

        ranked
    }
}

/// Rank `(id, profile)` entries for a viewer as of `today`.
pub fn rank_candidates(
    viewer: Option<&ProfileRecord>,
    candidates: &[ProfileEntry],
    today: NaiveDate,
    options: RankOptions,
) -> Vec<RankedCandidate> {
    CompatibilityEngine::with_reference_date(today).rank(
        viewer,
        candidates.iter().map(|entry| (&entry.id, &entry.profile)),
        options,
    )
}
