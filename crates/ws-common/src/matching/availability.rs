use super::location::FitStatus;
use super::scoring::MatchingConfig;
use crate::normalize::{fold_tags, fold_text};

/// Worker tags meaning "any schedule works" (folded form).
pub const FLEXIBLE_TAGS: &[&str] = &[
    "flexible",
    "cualquier horario",
    "disponibilidad total",
    "disponibilidad completa",
    "24/7",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityEvaluation {
    pub score: f64, // 0.0..=100.0
    pub compatible: bool,
    pub status: FitStatus,
    pub overlapping: Vec<String>,
}

/// Compare worker availability tags with the job's schedule tags and duration.
pub fn evaluate_availability(
    worker_tags: &[String],
    job_schedule: &[String],
    job_duration: Option<&str>,
    config: &MatchingConfig,
) -> AvailabilityEvaluation {
    let worker = fold_tags(worker_tags);
    let mut job = fold_tags(job_schedule);
    if let Some(duration) = job_duration.map(fold_text).filter(|d| !d.is_empty()) {
        if !job.contains(&duration) {
            job.push(duration);
        }
    }

    if worker.is_empty() || job.is_empty() {
        return AvailabilityEvaluation {
            score: config.availability_unknown_score,
            compatible: true,
            status: FitStatus::Unknown,
            overlapping: vec![],
        };
    }

    let overlapping: Vec<String> = job.iter().filter(|tag| worker.contains(tag)).cloned().collect();
    let flexible = worker.iter().any(|tag| FLEXIBLE_TAGS.contains(&tag.as_str()));

    if flexible || !overlapping.is_empty() {
        AvailabilityEvaluation {
            score: 100.0,
            compatible: true,
            status: FitStatus::Match,
            overlapping,
        }
    } else {
        AvailabilityEvaluation {
            score: config.availability_mismatch_score,
            compatible: false,
            status: FitStatus::Mismatch,
            overlapping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn eval(worker: &[&str], schedule: &[&str], duration: Option<&str>) -> AvailabilityEvaluation {
        evaluate_availability(&tags(worker), &tags(schedule), duration, &MatchingConfig::default())
    }

    #[test]
    fn overlapping_tag_is_compatible() {
        let result = eval(&["Mañanas", "Fines de semana"], &["fines de semana"], None);
        assert!(result.compatible);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.overlapping, vec!["fines de semana"]);
    }

    #[test]
    fn flexible_worker_matches_any_schedule() {
        let result = eval(&["Flexible"], &["noches"], None);
        assert!(result.compatible);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn missing_information_gets_partial_credit() {
        let no_worker = eval(&[], &["noches"], None);
        assert!(no_worker.compatible);
        assert_eq!(no_worker.score, 50.0);
        assert_eq!(no_worker.status, FitStatus::Unknown);

        let no_job = eval(&["noches"], &[], None);
        assert_eq!(no_job.score, 50.0);
    }

    #[test]
    fn duration_counts_as_a_scheduling_tag() {
        let result = eval(&["Temporal"], &[], Some("temporal"));
        assert!(result.compatible);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn disjoint_tags_keep_a_baseline() {
        let result = eval(&["mañanas"], &["noches"], None);
        assert!(!result.compatible);
        assert_eq!(result.score, 30.0);
        assert_eq!(result.status, FitStatus::Mismatch);
    }
}
