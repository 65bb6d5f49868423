//! Supply Match - requirement-to-offer matching for street food vendor procurement
//!
//! This library ranks supplier offers against a vendor's structured
//! requirement by distance, price fit, quality, supplier trust and stock.
//! The HTTP binary in `main.rs` wires it to a PostgreSQL catalog.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchingEngine, MatchError, MatchOutcome, extract_requirement, distance::{haversine_distance, distance_km}};
pub use crate::models::{Requirement, Buyer, Offer, MatchResult, MatchingConfig, ScoringWeights, FindMatchesRequest, FindMatchesResponse};
pub use crate::services::{CatalogAccess, CatalogError, InMemoryCatalog};
