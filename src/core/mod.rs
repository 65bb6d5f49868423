// Core algorithm exports
pub mod distance;
pub mod extraction;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::{haversine_distance, distance_km, distance_or, calculate_bounding_box, is_within_bounding_box, DEFAULT_DISTANCE_KM};
pub use extraction::extract_requirement;
pub use filters::{build_offer_query, matches_offer_query, matches_search_terms, search_terms};
pub use matcher::{MatchingEngine, MatchError, MatchOutcome, DEFAULT_LIMIT};
pub use scoring::{calculate_match_score, ScoreBreakdown};
