use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::debug;

use super::scoring::{MatchResult, MatchScoringEngine, MatchingConfig};
use crate::{JobPosting, WorkerProfile};

pub const DEFAULT_RANK_LIMIT: usize = 20;

/// Filters applied after scoring, before truncation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    /// Drop results whose overall score is below this value.
    pub min_score: u8,
    /// Cap on returned results, applied after sorting.
    pub limit: usize,
    /// Keep only pairs where every required skill is matched.
    pub eligible_only: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            min_score: 0,
            limit: DEFAULT_RANK_LIMIT,
            eligible_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub worker: WorkerProfile,
    pub result: MatchResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedJob {
    pub job: JobPosting,
    pub result: MatchResult,
}

/// Ranks workers for a job and jobs for a worker with one scoring engine.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    scorer: MatchScoringEngine,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            scorer: MatchScoringEngine::new(config),
        }
    }

    pub fn score(&self, worker: &WorkerProfile, job: &JobPosting) -> MatchResult {
        self.scorer.score(worker, job)
    }

    /// Candidates for one job, best first; ties broken by worker id.
    pub fn rank_candidates_for_job(
        &self,
        job: &JobPosting,
        workers: &[WorkerProfile],
        options: &RankOptions,
    ) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = workers
            .par_iter()
            .map(|worker| RankedCandidate {
                result: self.scorer.score(worker, job),
                worker: worker.clone(),
            })
            .filter(|candidate| keep(&candidate.result, options))
            .collect();

        ranked.sort_by(|a, b| by_score_then_id(&a.result, &a.worker.id, &b.result, &b.worker.id));
        ranked.truncate(options.limit);

        debug!(
            job_id = %job.id,
            pool = workers.len(),
            returned = ranked.len(),
            "ranked candidates for job"
        );
        ranked
    }

    /// Open jobs for one worker, best first; ties broken by job id.
    pub fn rank_jobs_for_worker(
        &self,
        worker: &WorkerProfile,
        jobs: &[JobPosting],
        options: &RankOptions,
    ) -> Vec<RankedJob> {
        let mut ranked: Vec<RankedJob> = jobs
            .par_iter()
            .map(|job| RankedJob {
                result: self.scorer.score(worker, job),
                job: job.clone(),
            })
            .filter(|recommended| keep(&recommended.result, options))
            .collect();

        ranked.sort_by(|a, b| by_score_then_id(&a.result, &a.job.id, &b.result, &b.job.id));
        ranked.truncate(options.limit);

        debug!(
            worker_id = %worker.id,
            pool = jobs.len(),
            returned = ranked.len(),
            "ranked jobs for worker"
        );
        ranked
    }
}

fn keep(result: &MatchResult, options: &RankOptions) -> bool {
    result.overall_score >= options.min_score
        && (!options.eligible_only || result.meets_minimum_requirements)
}

fn by_score_then_id(a: &MatchResult, a_id: &str, b: &MatchResult, b_id: &str) -> Ordering {
    b.overall_score
        .cmp(&a.overall_score)
        .then_with(|| a_id.cmp(b_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProficiencyLevel, RequiredSkill, WorkerSkill};

    fn job() -> JobPosting {
        JobPosting {
            id: "job-1".into(),
            title: "Cocinero/a".into(),
            location: Some("Valencia".into()),
            schedule: vec!["noches".into()],
            required_skills: vec![
                RequiredSkill::new("Cocina", ProficiencyLevel::Intermedio).weighted(5),
                RequiredSkill::new("Manipulación de alimentos", ProficiencyLevel::Basico)
                    .weighted(2),
            ],
            ..JobPosting::default()
        }
    }

    fn worker(id: &str, level: ProficiencyLevel, years: f64, location: &str) -> WorkerProfile {
        WorkerProfile {
            id: id.into(),
            location: Some(location.into()),
            total_years_experience: years,
            availability: vec!["Noches".into()],
            skills: vec![
                WorkerSkill {
                    name: "Cocina".into(),
                    level,
                    years_experience: years as u32,
                },
                WorkerSkill {
                    name: "Manipulador de alimentos".into(),
                    level: ProficiencyLevel::Basico,
                    years_experience: 1,
                },
            ],
        }
    }

    fn pool() -> Vec<WorkerProfile> {
        vec![
            worker("w-c", ProficiencyLevel::Experto, 6.0, "Valencia"),
            worker("w-a", ProficiencyLevel::Basico, 1.0, "Bilbao"),
            worker("w-b", ProficiencyLevel::Experto, 6.0, "Valencia"),
            worker("w-d", ProficiencyLevel::Avanzado, 3.0, "Valencia"),
        ]
    }

    #[test]
    fn ranks_by_score_and_breaks_ties_by_id() {
        let engine = MatchingEngine::default();
        let ranked = engine.rank_candidates_for_job(&job(), &pool(), &RankOptions::default());

        let ids: Vec<&str> = ranked.iter().map(|r| r.worker.id.as_str()).collect();
        assert_eq!(ids, vec!["w-b", "w-c", "w-d", "w-a"]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].result.overall_score >= w[1].result.overall_score));
    }

    #[test]
    fn ranking_is_stable_across_calls() {
        let engine = MatchingEngine::default();
        let options = RankOptions::default();
        let first = engine.rank_candidates_for_job(&job(), &pool(), &options);
        let second = engine.rank_candidates_for_job(&job(), &pool(), &options);
        assert_eq!(first, second);
    }

    #[test]
    fn applies_min_score_then_limit() {
        let engine = MatchingEngine::default();
        let options = RankOptions {
            min_score: 90,
            limit: 1,
            eligible_only: false,
        };
        let ranked = engine.rank_candidates_for_job(&job(), &pool(), &options);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].worker.id, "w-b");
        assert!(ranked[0].result.overall_score >= 90);
    }

    #[test]
    fn eligible_only_drops_workers_missing_required_skills() {
        let engine = MatchingEngine::default();
        let options = RankOptions {
            eligible_only: true,
            ..RankOptions::default()
        };
        let ranked = engine.rank_candidates_for_job(&job(), &pool(), &options);

        assert!(ranked.iter().all(|r| r.result.meets_minimum_requirements));
        assert!(ranked.iter().all(|r| r.worker.id != "w-a"));
    }

    #[test]
    fn recommends_jobs_for_a_worker() {
        let engine = MatchingEngine::default();
        let mut remote = job();
        remote.id = "job-2".into();
        remote.location = Some("Sevilla".into());
        let mut twin = job();
        twin.id = "job-0".into();

        let candidate = worker("w-b", ProficiencyLevel::Experto, 6.0, "Valencia");
        let ranked = engine.rank_jobs_for_worker(
            &candidate,
            &[job(), remote, twin],
            &RankOptions::default(),
        );

        let ids: Vec<&str> = ranked.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["job-0", "job-1", "job-2"]);
        assert!(!ranked[2].result.location_compatible);
    }

    #[test]
    fn empty_pools_rank_to_nothing() {
        let engine = MatchingEngine::default();
        assert!(engine
            .rank_candidates_for_job(&job(), &[], &RankOptions::default())
            .is_empty());
        assert!(engine
            .rank_jobs_for_worker(&pool()[0], &[], &RankOptions::default())
            .is_empty());
    }
}
