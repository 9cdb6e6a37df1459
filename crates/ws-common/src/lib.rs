pub mod api;
pub mod db;
pub mod logging;
pub mod matching;
pub mod normalize;

use serde::{Deserialize, Serialize};

pub use matching::level::ProficiencyLevel;

/// Importance assigned to a required skill when the posting leaves it blank.
pub const DEFAULT_IMPORTANCE_WEIGHT: u8 = 3;
pub const MIN_IMPORTANCE_WEIGHT: u8 = 1;
pub const MAX_IMPORTANCE_WEIGHT: u8 = 5;

// Read-only inputs of the match engine. Callers normalise their own storage
// shape into these before scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSkill {
    pub name: String,
    pub level: ProficiencyLevel,
    #[serde(default)]
    pub years_experience: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub id: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub total_years_experience: f64,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default)]
    pub skills: Vec<WorkerSkill>,
}

impl WorkerProfile {
    /// Years of experience with negative and non-finite values read as zero.
    pub fn sanitized_years(&self) -> f64 {
        if self.total_years_experience.is_finite() {
            self.total_years_experience.max(0.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredSkill {
    pub name: String,
    pub minimum_level: ProficiencyLevel,
    #[serde(default)]
    pub importance_weight: Option<u8>,
    #[serde(default = "default_true")]
    pub is_required: bool,
}

impl RequiredSkill {
    pub fn new(name: impl Into<String>, minimum_level: ProficiencyLevel) -> Self {
        Self {
            name: name.into(),
            minimum_level,
            importance_weight: None,
            is_required: true,
        }
    }

    pub fn weighted(mut self, weight: u8) -> Self {
        self.importance_weight = Some(weight);
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    /// Importance weight clamped into 1..=5, defaulting to the mid value.
    pub fn effective_weight(&self) -> u8 {
        self.importance_weight
            .unwrap_or(DEFAULT_IMPORTANCE_WEIGHT)
            .clamp(MIN_IMPORTANCE_WEIGHT, MAX_IMPORTANCE_WEIGHT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub schedule: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<RequiredSkill>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_weight_defaults_and_clamps() {
        let skill = RequiredSkill::new("Barista", ProficiencyLevel::Basico);
        assert_eq!(skill.effective_weight(), 3);
        assert_eq!(skill.clone().weighted(9).effective_weight(), 5);
        assert_eq!(skill.weighted(0).effective_weight(), 1);
    }

    #[test]
    fn required_flag_defaults_to_true_on_the_wire() {
        let skill: RequiredSkill =
            serde_json::from_str(r#"{"name":"Coctelería","minimumLevel":"BASICO"}"#).unwrap();
        assert!(skill.is_required);
        assert_eq!(skill.importance_weight, None);
    }

    #[test]
    fn worker_years_are_sanitized() {
        let mut worker = WorkerProfile {
            total_years_experience: -2.0,
            ..WorkerProfile::default()
        };
        assert_eq!(worker.sanitized_years(), 0.0);
        worker.total_years_experience = f64::NAN;
        assert_eq!(worker.sanitized_years(), 0.0);
        worker.total_years_experience = 4.5;
        assert_eq!(worker.sanitized_years(), 4.5);
    }
}
