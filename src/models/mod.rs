// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ANY_PRODUCT, Urgency, QualityPreference, Requirement, Buyer, Offer, MatchResult,
    BoundingBox, OfferQuery, MatchingConfig, ScoringWeights,
};
pub use requests::{FindMatchesRequest, ExtractRequirementRequest};
pub use responses::{FindMatchesResponse, ExtractRequirementResponse, HealthResponse, ErrorResponse};
