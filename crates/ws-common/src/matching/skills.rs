use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::normalize::canonical_skill;
use crate::{ProficiencyLevel, RequiredSkill, WorkerSkill};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedSkill {
    pub name: String,
    pub level_held: ProficiencyLevel,
}

/// A requirement the worker does not satisfy. `level_held` is set when the
/// worker has the skill below the required level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSkill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_held: Option<ProficiencyLevel>,
    pub required_level: ProficiencyLevel,
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillEvaluation {
    /// 0.0..=100.0
    pub score: f64,
    pub matched: Vec<MatchedSkill>,
    pub missing: Vec<MissingSkill>,
    pub meets_minimum_requirements: bool,
}

/// Worker skills keyed by canonical name.
///
/// Profiles should not repeat a skill, but if two entries fold to the same key
/// the higher level (then more years) wins so lookups stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct WorkerSkillIndex<'a> {
    by_name: HashMap<String, &'a WorkerSkill>,
}

impl<'a> WorkerSkillIndex<'a> {
    pub fn new(skills: &'a [WorkerSkill]) -> Self {
        let mut by_name: HashMap<String, &'a WorkerSkill> = HashMap::with_capacity(skills.len());
        for skill in skills {
            let key = canonical_skill(&skill.name);
            if key.is_empty() {
                continue;
            }
            by_name
                .entry(key)
                .and_modify(|held| {
                    if (skill.level, skill.years_experience) > (held.level, held.years_experience) {
                        *held = skill;
                    }
                })
                .or_insert(skill);
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a WorkerSkill> {
        self.by_name.get(&canonical_skill(name)).copied()
    }
}

/// Weighted share of requirement importance the worker satisfies.
///
/// An empty requirement list scores 100: the posting imposes no skill
/// constraint, so every worker trivially satisfies it.
pub fn evaluate_skills(required: &[RequiredSkill], index: &WorkerSkillIndex<'_>) -> SkillEvaluation {
    if required.is_empty() {
        return SkillEvaluation {
            score: 100.0,
            matched: vec![],
            missing: vec![],
            meets_minimum_requirements: true,
        };
    }

    let mut total_weight = 0u32;
    let mut matched_weight = 0u32;
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut meets_minimum_requirements = true;

    for requirement in required {
        let weight = u32::from(requirement.effective_weight());
        total_weight += weight;

        match index.get(&requirement.name) {
            Some(held) if held.level.satisfies(requirement.minimum_level) => {
                matched_weight += weight;
                matched.push(MatchedSkill {
                    name: requirement.name.clone(),
                    level_held: held.level,
                });
            }
            held => {
                if requirement.is_required {
                    meets_minimum_requirements = false;
                }
                missing.push(MissingSkill {
                    name: requirement.name.clone(),
                    level_held: held.map(|skill| skill.level),
                    required_level: requirement.minimum_level,
                    is_required: requirement.is_required,
                });
            }
        }
    }

    let score = f64::from(matched_weight) / f64::from(total_weight) * 100.0;

    SkillEvaluation {
        score,
        matched,
        missing,
        meets_minimum_requirements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, level: ProficiencyLevel, years: u32) -> WorkerSkill {
        WorkerSkill {
            name: name.into(),
            level,
            years_experience: years,
        }
    }

    #[test]
    fn empty_requirements_pass() {
        let skills = vec![];
        let result = evaluate_skills(&[], &WorkerSkillIndex::new(&skills));
        assert_eq!(result.score, 100.0);
        assert!(result.meets_minimum_requirements);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn weights_matched_requirements() {
        let skills = vec![skill("Atención al cliente", ProficiencyLevel::Avanzado, 3)];
        let required = vec![
            RequiredSkill::new("Atención al cliente", ProficiencyLevel::Intermedio).weighted(5),
            RequiredSkill::new("Coctelería", ProficiencyLevel::Basico)
                .weighted(2)
                .optional(),
        ];

        let result = evaluate_skills(&required, &WorkerSkillIndex::new(&skills));

        assert!((result.score - 500.0 / 7.0).abs() < 1e-9);
        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].name, "Atención al cliente");
        assert_eq!(result.missing.len(), 1);
        assert_eq!(result.missing[0].name, "Coctelería");
        assert_eq!(result.missing[0].level_held, None);
        assert!(result.meets_minimum_requirements);
    }

    #[test]
    fn below_level_is_missing_but_reports_held_level() {
        let skills = vec![skill("Barista", ProficiencyLevel::Basico, 1)];
        let required = vec![RequiredSkill::new("barista", ProficiencyLevel::Avanzado)];

        let result = evaluate_skills(&required, &WorkerSkillIndex::new(&skills));

        assert_eq!(result.score, 0.0);
        assert!(!result.meets_minimum_requirements);
        assert_eq!(result.missing[0].level_held, Some(ProficiencyLevel::Basico));
        assert_eq!(result.missing[0].required_level, ProficiencyLevel::Avanzado);
    }

    #[test]
    fn unmatched_optional_skill_keeps_minimum_requirements() {
        let skills = vec![];
        let required = vec![RequiredSkill::new("Sumiller", ProficiencyLevel::Basico).optional()];

        let result = evaluate_skills(&required, &WorkerSkillIndex::new(&skills));

        assert_eq!(result.score, 0.0);
        assert!(result.meets_minimum_requirements);
    }

    #[test]
    fn aliases_and_case_are_matched() {
        let skills = vec![skill("MESERO", ProficiencyLevel::Experto, 8)];
        let required = vec![RequiredSkill::new("Camarero", ProficiencyLevel::Avanzado)];

        let result = evaluate_skills(&required, &WorkerSkillIndex::new(&skills));

        assert_eq!(result.score, 100.0);
        assert_eq!(result.matched[0].level_held, ProficiencyLevel::Experto);
    }

    #[test]
    fn duplicate_worker_skills_keep_the_best_entry() {
        let skills = vec![
            skill("Cocina", ProficiencyLevel::Basico, 10),
            skill("cocina ", ProficiencyLevel::Avanzado, 2),
        ];
        let index = WorkerSkillIndex::new(&skills);
        let held = index.get("COCINA").unwrap();
        assert_eq!(held.level, ProficiencyLevel::Avanzado);
    }

    #[test]
    fn adding_a_matching_skill_never_lowers_the_score() {
        let required = vec![
            RequiredSkill::new("Cocina", ProficiencyLevel::Intermedio).weighted(4),
            RequiredSkill::new("Limpieza", ProficiencyLevel::Basico).weighted(1),
        ];
        let mut skills = vec![skill("Limpieza", ProficiencyLevel::Intermedio, 1)];
        let before = evaluate_skills(&required, &WorkerSkillIndex::new(&skills)).score;

        skills.push(skill("Cocina", ProficiencyLevel::Experto, 6));
        let after = evaluate_skills(&required, &WorkerSkillIndex::new(&skills)).score;

        assert!(after >= before);
        assert_eq!(after, 100.0);
    }
}
