use super::scoring::MatchingConfig;
use crate::normalize::fold_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStatus {
    Match,
    /// One side did not state a constraint; partial credit, still compatible.
    Unknown,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationEvaluation {
    pub score: f64, // 0.0..=100.0
    pub compatible: bool,
    pub status: FitStatus,
}

/// Geographic fit between a worker's stated location and the job's.
///
/// Comparison is on folded text: equality or containment in either direction
/// ("Madrid" vs "Madrid Centro") is a match.
pub fn evaluate_location(
    worker_location: Option<&str>,
    job_location: Option<&str>,
    config: &MatchingConfig,
) -> LocationEvaluation {
    let worker = worker_location.map(fold_text).filter(|s| !s.is_empty());
    let job = job_location.map(fold_text).filter(|s| !s.is_empty());

    let (Some(worker), Some(job)) = (worker, job) else {
        return LocationEvaluation {
            score: config.location_unknown_score,
            compatible: true,
            status: FitStatus::Unknown,
        };
    };

    if worker == job || job.contains(&worker) || worker.contains(&job) {
        LocationEvaluation {
            score: 100.0,
            compatible: true,
            status: FitStatus::Match,
        }
    } else {
        LocationEvaluation {
            score: config.location_mismatch_score,
            compatible: false,
            status: FitStatus::Mismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(worker: Option<&str>, job: Option<&str>) -> LocationEvaluation {
        evaluate_location(worker, job, &MatchingConfig::default())
    }

    #[test]
    fn substring_is_compatible() {
        let result = eval(Some("Madrid"), Some("Madrid Centro"));
        assert!(result.compatible);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.status, FitStatus::Match);
    }

    #[test]
    fn containment_works_in_both_directions() {
        assert!(eval(Some("Sevilla, Triana"), Some("sevilla")).compatible);
    }

    #[test]
    fn folds_case_and_accents() {
        let result = eval(Some("  MÁLAGA "), Some("malaga"));
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn absent_worker_location_gets_partial_credit() {
        let result = eval(None, Some("Madrid"));
        assert!(result.compatible);
        assert_eq!(result.score, 50.0);
        assert_eq!(result.status, FitStatus::Unknown);

        assert_eq!(eval(Some("   "), Some("Madrid")).score, 50.0);
    }

    #[test]
    fn blank_job_location_is_treated_as_unknown() {
        let result = eval(Some("Madrid"), Some(""));
        assert_eq!(result.status, FitStatus::Unknown);
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn different_cities_keep_a_baseline() {
        let result = eval(Some("Bilbao"), Some("Valencia"));
        assert!(!result.compatible);
        assert_eq!(result.score, 30.0);
        assert_eq!(result.status, FitStatus::Mismatch);
    }
}
