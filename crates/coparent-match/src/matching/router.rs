use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::directory::ProfileDirectory;
use super::domain::{ProfileEntry, ProfileId, ProfileRecord};
use super::engine::CompatibilityOutcome;
use super::ranking::{RankOptions, RankedCandidate};
use super::service::CompatibilityService;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub viewer: Option<ProfileRecord>,
    pub candidate: ProfileRecord,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub viewer: Option<ProfileRecord>,
    pub candidates: Vec<ProfileEntry>,
    #[serde(default)]
    pub min_score: Option<u8>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub results: Vec<RankedCandidate>,
}

/// Router builder exposing the compatibility endpoints.
pub fn compatibility_router<D>(service: Arc<CompatibilityService<D>>) -> Router
where
    D: ProfileDirectory + 'static,
{
    Router::new()
        .route("/api/v1/compatibility", post(score_handler::<D>))
        .route("/api/v1/compatibility/rank", post(rank_handler::<D>))
        .route("/api/v1/profiles/:profile_id", put(store_handler::<D>))
        .route(
            "/api/v1/profiles/:profile_id/compatibility/:candidate_id",
            get(pair_handler::<D>),
        )
        .with_state(service)
}

pub(crate) async fn score_handler<D>(
    State(service): State<Arc<CompatibilityService<D>>>,
    Json(request): Json<ScoreRequest>,
) -> Json<CompatibilityOutcome>
where
    D: ProfileDirectory + 'static,
{
    Json(service.score_records(request.viewer.as_ref(), &request.candidate))
}

pub(crate) async fn rank_handler<D>(
    State(service): State<Arc<CompatibilityService<D>>>,
    Json(request): Json<RankRequest>,
) -> Json<RankResponse>
where
    D: ProfileDirectory + 'static,
{
    let options = RankOptions {
        min_score: request.min_score,
        limit: request.limit,
    };
    let results = service.rank(request.viewer.as_ref(), &request.candidates, options);
    Json(RankResponse { results })
}

pub(crate) async fn store_handler<D>(
    State(service): State<Arc<CompatibilityService<D>>>,
    Path(profile_id): Path<String>,
    Json(record): Json<ProfileRecord>,
) -> Result<StatusCode, AppError>
where
    D: ProfileDirectory + 'static,
{
    service.store(ProfileId(profile_id), record)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn pair_handler<D>(
    State(service): State<Arc<CompatibilityService<D>>>,
    Path((profile_id, candidate_id)): Path<(String, String)>,
) -> Result<Json<CompatibilityOutcome>, AppError>
where
    D: ProfileDirectory + 'static,
{
    let outcome = service.score_ids(&ProfileId(profile_id), &ProfileId(candidate_id))?;
    Ok(Json(outcome))
}
