use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::{
    availability::evaluate_availability,
    experience::evaluate_experience,
    location::{FitStatus, evaluate_location},
    narrative::{Category, CategoryScore, describe},
    skills::{MatchedSkill, MissingSkill, WorkerSkillIndex, evaluate_skills},
    weights::{DEFAULT_WEIGHTS, Weights},
};
use crate::{JobPosting, WorkerProfile};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("weights must be non-negative and sum to 1.0 (got {0:.4})")]
    WeightsNotNormalized(f64),
    #[error("thresholds must satisfy 0 <= weak <= strong <= 100 (weak={weak}, strong={strong})")]
    InvalidThresholds { weak: f64, strong: f64 },
    #[error("{name} must be within 0..=100 (got {value})")]
    ScoreOutOfRange { name: &'static str, value: f64 },
    #[error("experience saturation must be positive (got {0})")]
    InvalidSaturation(f64),
}

/// Tunables of the scoring engine. Defaults are the documented policy values.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub weights: Weights,
    pub strong_threshold: f64,
    pub weak_threshold: f64,
    pub location_unknown_score: f64,
    pub location_mismatch_score: f64,
    pub availability_unknown_score: f64,
    pub availability_mismatch_score: f64,
    pub experience_saturation_years: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            strong_threshold: 80.0,
            weak_threshold: 60.0,
            location_unknown_score: 50.0,
            location_mismatch_score: 30.0,
            availability_unknown_score: 50.0,
            availability_mismatch_score: 30.0,
            experience_saturation_years: 5.0,
        }
    }
}

impl MatchingConfig {
    /// Defaults overridden by `WS_MATCH_*` variables. An invalid combination is
    /// logged and the defaults are used instead.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let candidate = Self {
            weights: Weights {
                skills: env_f64("WS_MATCH_WEIGHT_SKILLS").unwrap_or(defaults.weights.skills),
                experience: env_f64("WS_MATCH_WEIGHT_EXPERIENCE")
                    .unwrap_or(defaults.weights.experience),
                location: env_f64("WS_MATCH_WEIGHT_LOCATION").unwrap_or(defaults.weights.location),
                availability: env_f64("WS_MATCH_WEIGHT_AVAILABILITY")
                    .unwrap_or(defaults.weights.availability),
            },
            strong_threshold: env_f64("WS_MATCH_STRONG_THRESHOLD")
                .unwrap_or(defaults.strong_threshold),
            weak_threshold: env_f64("WS_MATCH_WEAK_THRESHOLD").unwrap_or(defaults.weak_threshold),
            experience_saturation_years: env_f64("WS_MATCH_EXPERIENCE_SATURATION_YEARS")
                .unwrap_or(defaults.experience_saturation_years),
            ..defaults.clone()
        };

        match candidate.validate() {
            Ok(()) => candidate,
            Err(err) => {
                warn!(error = %err, "invalid matching configuration, using defaults");
                defaults
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.weights.is_normalized() {
            return Err(ConfigError::WeightsNotNormalized(self.weights.sum()));
        }

        for (name, value) in [
            ("strong_threshold", self.strong_threshold),
            ("weak_threshold", self.weak_threshold),
            ("location_unknown_score", self.location_unknown_score),
            ("location_mismatch_score", self.location_mismatch_score),
            ("availability_unknown_score", self.availability_unknown_score),
            ("availability_mismatch_score", self.availability_mismatch_score),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ScoreOutOfRange { name, value });
            }
        }

        if self.weak_threshold > self.strong_threshold {
            return Err(ConfigError::InvalidThresholds {
                weak: self.weak_threshold,
                strong: self.strong_threshold,
            });
        }

        if !(self.experience_saturation_years.is_finite() && self.experience_saturation_years > 0.0)
        {
            return Err(ConfigError::InvalidSaturation(
                self.experience_saturation_years,
            ));
        }

        Ok(())
    }
}

/// Display band for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchTier {
    Excelente,
    Bueno,
    Regular,
    Bajo,
}

impl MatchTier {
    pub fn from_score(overall: u8) -> Self {
        match overall {
            80..=u8::MAX => MatchTier::Excelente,
            60..=79 => MatchTier::Bueno,
            40..=59 => MatchTier::Regular,
            _ => MatchTier::Bajo,
        }
    }
}

/// Compatibility report for one (worker, job) pair. Built fresh per query and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub overall_score: u8,
    pub skills_score: f64,
    pub location_score: f64,
    pub experience_score: f64,
    pub availability_score: f64,
    pub matched_skills: Vec<MatchedSkill>,
    pub missing_skills: Vec<MissingSkill>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub meets_minimum_requirements: bool,
    pub location_compatible: bool,
    pub availability_compatible: bool,
    pub tier: MatchTier,
}

/// Score one pair with the default configuration.
pub fn score_match(worker: &WorkerProfile, job: &JobPosting) -> MatchResult {
    MatchScoringEngine::default().score(worker, job)
}

#[derive(Debug, Clone, Default)]
pub struct MatchScoringEngine {
    config: MatchingConfig,
}

impl MatchScoringEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Pure: identical inputs always give an identical result.
    pub fn score(&self, worker: &WorkerProfile, job: &JobPosting) -> MatchResult {
        let index = WorkerSkillIndex::new(&worker.skills);

        let skills = evaluate_skills(&job.required_skills, &index);
        let experience = evaluate_experience(worker, &job.required_skills, &index, &self.config);
        let location = evaluate_location(
            worker.location.as_deref(),
            job.location.as_deref(),
            &self.config,
        );
        let availability = evaluate_availability(
            &worker.availability,
            &job.schedule,
            job.duration.as_deref(),
            &self.config,
        );

        let weights = self.config.weights;
        let weighted = skills.score * weights.skills
            + experience.score * weights.experience
            + location.score * weights.location
            + availability.score * weights.availability;
        let overall_score = weighted.round().clamp(0.0, 100.0) as u8;

        let (strengths, weaknesses) = describe(
            &[
                CategoryScore {
                    category: Category::Skills,
                    score: skills.score,
                    unknown: false,
                },
                CategoryScore {
                    category: Category::Experience,
                    score: experience.score,
                    unknown: false,
                },
                CategoryScore {
                    category: Category::Location,
                    score: location.score,
                    unknown: location.status == FitStatus::Unknown,
                },
                CategoryScore {
                    category: Category::Availability,
                    score: availability.score,
                    unknown: availability.status == FitStatus::Unknown,
                },
            ],
            self.config.strong_threshold,
            self.config.weak_threshold,
        );

        MatchResult {
            overall_score,
            skills_score: skills.score,
            location_score: location.score,
            experience_score: experience.score,
            availability_score: availability.score,
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            strengths,
            weaknesses,
            meets_minimum_requirements: skills.meets_minimum_requirements,
            location_compatible: location.compatible,
            availability_compatible: availability.compatible,
            tier: MatchTier::from_score(overall_score),
        }
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
