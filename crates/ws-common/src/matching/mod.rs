pub mod availability;
pub mod experience;
pub mod level;
pub mod location;
pub mod narrative;
pub mod ranking;
pub mod scoring;
pub mod skills;
pub mod weights;

pub use ranking::{MatchingEngine, RankOptions, RankedCandidate, RankedJob};
pub use scoring::{MatchResult, MatchScoringEngine, MatchTier, MatchingConfig, score_match};
