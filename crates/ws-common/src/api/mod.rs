pub mod match_request;
pub mod match_response;

pub use match_request::{MatchQuery, QueryError, ScoreRequest};
pub use match_response::{CandidateMatch, RecommendedJob};
