use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use tracing::{info, warn};
use ws_common::api::{CandidateMatch, MatchQuery, RecommendedJob, ScoreRequest};
use ws_common::db::{
    fetch_active_worker_profiles, fetch_job_posting, fetch_open_job_postings,
    fetch_worker_profile, fetch_worker_profile_by_user,
};
use ws_common::matching::MatchResult;

use crate::SharedState;
use crate::auth::{AuthUser, UserRole};
use crate::error::ApiError;

/// Run a CPU-bound ranking off the async workers.
async fn rank_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| ApiError::Internal(format!("ranking task failed: {err}")))
}

/// Pools are read in id order up to the cap, so a full pool means rows past
/// the cap were never scored.
fn pool_hit_cap(pool: &'static str, pool_size: usize, cap: i64) -> bool {
    let truncated = i64::try_from(pool_size).is_ok_and(|size| size >= cap);
    if truncated {
        warn!(pool, pool_size, cap, "ranking pool hit WS_MAX_CANDIDATE_POOL, results may be incomplete");
    }
    truncated
}

pub async fn company_job_matches(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(job_id): Path<String>,
    query: Result<Query<MatchQuery>, QueryRejection>,
) -> Result<Json<Vec<CandidateMatch>>, ApiError> {
    let Query(query) = query?;
    let options = query.rank_options()?;
    if !matches!(auth.role, UserRole::Company | UserRole::Service) {
        return Err(ApiError::Forbidden("company role required".into()));
    }

    let record = fetch_job_posting(&state.pool, &job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("job not found: {job_id}")))?;
    if auth.role == UserRole::Company && !record.is_owned_by(&auth.subject) {
        return Err(ApiError::Forbidden("job belongs to another company".into()));
    }

    let workers = fetch_active_worker_profiles(&state.pool, state.config.max_candidate_pool).await?;
    let pool_size = workers.len();
    pool_hit_cap("workers", pool_size, state.config.max_candidate_pool);

    let engine = state.engine.clone();
    let job = record.job;
    let ranked = rank_blocking(move || engine.rank_candidates_for_job(&job, &workers, &options)).await?;

    info!(
        job_id = %job_id,
        pool_size,
        returned = ranked.len(),
        min_score = options.min_score,
        eligible_only = options.eligible_only,
        "company_job_matches"
    );

    Ok(Json(ranked.into_iter().map(CandidateMatch::from).collect()))
}

pub async fn recommended_jobs(
    auth: AuthUser,
    State(state): State<SharedState>,
    query: Result<Query<MatchQuery>, QueryRejection>,
) -> Result<Json<Vec<RecommendedJob>>, ApiError> {
    let Query(query) = query?;
    let options = query.rank_options()?;

    let worker = match auth.role {
        UserRole::Worker => fetch_worker_profile_by_user(&state.pool, &auth.subject)
            .await?
            .ok_or_else(|| ApiError::NotFound("worker profile not found".into()))?,
        UserRole::Service => {
            let worker_id = query
                .worker_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ApiError::BadRequest("workerId is required".into()))?;
            fetch_worker_profile(&state.pool, worker_id)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("worker not found: {worker_id}")))?
        }
        UserRole::Company | UserRole::Unknown => {
            return Err(ApiError::Forbidden("worker role required".into()));
        }
    };

    let jobs = fetch_open_job_postings(&state.pool, state.config.max_candidate_pool).await?;
    let pool_size = jobs.len();
    pool_hit_cap("jobs", pool_size, state.config.max_candidate_pool);
    let worker_id = worker.id.clone();

    let engine = state.engine.clone();
    let ranked = rank_blocking(move || engine.rank_jobs_for_worker(&worker, &jobs, &options)).await?;

    info!(
        worker_id = %worker_id,
        pool_size,
        returned = ranked.len(),
        min_score = options.min_score,
        "recommended_jobs"
    );

    Ok(Json(ranked.into_iter().map(RecommendedJob::from).collect()))
}

/// Score an ad-hoc pair without touching the database.
pub async fn score_match(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<MatchResult>, ApiError> {
    if request.worker.id.trim().is_empty() || request.job.id.trim().is_empty() {
        return Err(ApiError::BadRequest("worker.id and job.id are required".into()));
    }

    Ok(Json(state.engine.score(&request.worker, &request.job)))
}
