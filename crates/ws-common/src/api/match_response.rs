use serde::Serialize;

use crate::matching::ranking::{RankedCandidate, RankedJob};
use crate::matching::scoring::MatchResult;
use crate::{JobPosting, WorkerProfile};

/// One row of `GET /api/company/jobs/:job_id/matches`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMatch {
    pub worker_id: String,
    pub worker: WorkerProfile,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl From<RankedCandidate> for CandidateMatch {
    fn from(ranked: RankedCandidate) -> Self {
        Self {
            worker_id: ranked.worker.id.clone(),
            worker: ranked.worker,
            result: ranked.result,
        }
    }
}

/// One row of `GET /api/worker/recommended-jobs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedJob {
    pub job_id: String,
    pub job: JobPosting,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl From<RankedJob> for RecommendedJob {
    fn from(ranked: RankedJob) -> Self {
        Self {
            job_id: ranked.job.id.clone(),
            job: ranked.job,
            result: ranked.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scoring::score_match;

    #[test]
    fn candidate_rows_flatten_the_result() {
        let worker = WorkerProfile {
            id: "w-7".into(),
            ..WorkerProfile::default()
        };
        let job = JobPosting {
            id: "j-1".into(),
            ..JobPosting::default()
        };
        let result = score_match(&worker, &job);
        let row = CandidateMatch::from(RankedCandidate { worker, result });

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["workerId"], "w-7");
        assert_eq!(value["worker"]["id"], "w-7");
        assert!(value.get("overallScore").is_some());
        assert!(value.get("result").is_none());
    }

    #[test]
    fn recommended_rows_carry_the_job() {
        let worker = WorkerProfile::default();
        let job = JobPosting {
            id: "j-2".into(),
            title: "Barista".into(),
            ..JobPosting::default()
        };
        let result = score_match(&worker, &job);
        let row = RecommendedJob::from(RankedJob { job, result });

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["jobId"], "j-2");
        assert_eq!(value["job"]["title"], "Barista");
        assert!(value.get("skillsScore").is_some());
    }
}
