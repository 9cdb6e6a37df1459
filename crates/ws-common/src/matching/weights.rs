/// Default weights for the overall score.
pub const DEFAULT_WEIGHTS: Weights = Weights {
    skills: 0.40,
    experience: 0.25,
    location: 0.20,
    availability: 0.15,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub availability: f64,
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.location + self.availability
    }

    pub fn is_normalized(&self) -> bool {
        let all_non_negative = [self.skills, self.experience, self.location, self.availability]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        all_non_negative && (self.sum() - 1.0).abs() < 1e-6
    }
}
