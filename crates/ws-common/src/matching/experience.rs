use super::scoring::MatchingConfig;
use super::skills::WorkerSkillIndex;
use crate::{RequiredSkill, WorkerProfile};

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceEvaluation {
    pub score: f64, // 0.0..=100.0
    pub effective_years: f64,
}

/// Capped linear curve: 0 years → 0, saturation years or more → 100.
///
/// Effective years is the larger of the profile total and the longest
/// per-skill experience among the job's required skills the worker holds.
/// Per-skill years only count once the profile total is above zero, so a
/// worker with no declared experience always gets the minimum.
pub fn evaluate_experience(
    worker: &WorkerProfile,
    required: &[RequiredSkill],
    index: &WorkerSkillIndex<'_>,
    config: &MatchingConfig,
) -> ExperienceEvaluation {
    let per_skill_years = required
        .iter()
        .filter_map(|requirement| index.get(&requirement.name))
        .map(|held| f64::from(held.years_experience))
        .fold(0.0_f64, f64::max);

    let total = worker.sanitized_years();
    let effective_years = if total > 0.0 {
        total.max(per_skill_years)
    } else {
        0.0
    };
    let saturation = config.experience_saturation_years.max(f64::EPSILON);
    let score = (effective_years / saturation).min(1.0) * 100.0;

    ExperienceEvaluation {
        score,
        effective_years,
    }
}
