//! Compatibility scoring between a viewer and candidate profiles.
//!
//! Raw records from the profile store are normalized once into
//! [`CanonicalProfile`]s, scored on ten independent factors, and combined with
//! fixed weights renormalized over the factors that had data. The scorer is
//! pure: the directory, service, and router layers only resolve records and
//! expose the result.

pub mod directory;
pub mod domain;
mod engine;
pub mod factors;
pub mod normalize;
mod ranking;
pub mod router;
mod service;
pub mod weights;

#[cfg(test)]
mod tests;

pub use directory::{
    load_profiles_from_path, load_profiles_from_reader, DirectoryError, InMemoryProfileDirectory,
    ProfileDirectory,
};
pub use domain::{
    CandidateProfile, LookingFor, ProfileEntry, ProfileId, ProfileRecord, ViewerProfile,
};
pub use engine::{
    compute_compatibility, compute_compatibility_on, CompatibilityEngine, CompatibilityOutcome,
    FactorContribution,
};
pub use factors::{MatchFactors, Score};
pub use normalize::{normalize_candidate, normalize_viewer, CanonicalProfile};
pub use ranking::{rank_candidates, RankOptions, RankedCandidate};
pub use router::compatibility_router;
pub use service::CompatibilityService;
pub use weights::{FactorKind, FACTOR_WEIGHTS};
