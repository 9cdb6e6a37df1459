use serde::Deserialize;
use thiserror::Error;

use crate::matching::ranking::{DEFAULT_RANK_LIMIT, RankOptions};
use crate::{JobPosting, WorkerProfile};

pub const MAX_RANK_LIMIT: i64 = 100;

/// Body of `POST /api/match/score`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub worker: WorkerProfile,
    pub job: JobPosting,
}

/// Query string shared by the ranking endpoints.
///
/// Values are kept wide so out-of-range input reaches `rank_options` and is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    #[serde(default)]
    pub min_score: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub eligible_only: Option<bool>,
    /// Only honoured for service callers on the worker endpoint.
    #[serde(default)]
    pub worker_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("minScore must be between 0 and 100 (got {0})")]
    MinScoreOutOfRange(i64),
    #[error("limit must be between 1 and {MAX_RANK_LIMIT} (got {0})")]
    LimitOutOfRange(i64),
}

impl MatchQuery {
    pub fn rank_options(&self) -> Result<RankOptions, QueryError> {
        let min_score = match self.min_score {
            None => 0,
            Some(raw) => u8::try_from(raw)
                .ok()
                .filter(|score| *score <= 100)
                .ok_or(QueryError::MinScoreOutOfRange(raw))?,
        };

        let limit = match self.limit {
            None => DEFAULT_RANK_LIMIT,
            Some(raw) if (1..=MAX_RANK_LIMIT).contains(&raw) => raw as usize,
            Some(raw) => return Err(QueryError::LimitOutOfRange(raw)),
        };

        Ok(RankOptions {
            min_score,
            limit,
            eligible_only: self.eligible_only.unwrap_or(false),
        })
    }
}
