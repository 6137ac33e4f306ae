use std::sync::Arc;

use tracing::debug;

use super::directory::{DirectoryError, ProfileDirectory};
use super::domain::{ProfileEntry, ProfileId, ProfileRecord};
use super::engine::{CompatibilityEngine, CompatibilityOutcome};
use super::ranking::{RankOptions, RankedCandidate};

/// Service composing the profile directory with the compatibility engine.
pub struct CompatibilityService<D> {
    directory: Arc<D>,
    engine: CompatibilityEngine,
}

impl<D> CompatibilityService<D>
where
    D: ProfileDirectory + 'static,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self::with_engine(directory, CompatibilityEngine::new())
    }

    pub fn with_engine(directory: Arc<D>, engine: CompatibilityEngine) -> Self {
        Self { directory, engine }
    }

    pub fn engine(&self) -> &CompatibilityEngine {
        &self.engine
    }

    pub fn store(&self, id: ProfileId, record: ProfileRecord) -> Result<(), DirectoryError> {
        debug!(profile = %id, "storing profile");
        self.directory.upsert(id, record)
    }

    /// Score two records supplied directly by the caller.
    pub fn score_records(
        &self,
        viewer: Option<&ProfileRecord>,
        candidate: &ProfileRecord,
    ) -> CompatibilityOutcome {
        self.engine.score(viewer, candidate)
    }

    /// Resolve both ids and score them. An unknown viewer scores 0; an unknown
    /// candidate is an error.
    pub fn score_ids(
        &self,
        viewer_id: &ProfileId,
        candidate_id: &ProfileId,
    ) -> Result<CompatibilityOutcome, DirectoryError> {
        let candidate = self
            .directory
            .fetch(candidate_id)?
            .ok_or_else(|| DirectoryError::UnknownProfile(candidate_id.clone()))?;

        let viewer = self.directory.fetch(viewer_id)?;
        if viewer.is_none() {
            debug!(viewer = %viewer_id, "viewer profile not found");
        }

        Ok(self.engine.score(viewer.as_ref(), &candidate))
    }

    pub fn rank(
        &self,
        viewer: Option<&ProfileRecord>,
        candidates: &[ProfileEntry],
        options: RankOptions,
    ) -> Vec<RankedCandidate> {
        self.engine.rank(
            viewer,
            candidates.iter().map(|entry| (&entry.id, &entry.profile)),
            options,
        )
    }
}
