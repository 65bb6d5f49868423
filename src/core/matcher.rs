use std::cmp::Ordering;
use thiserror::Error;
use crate::models::{Buyer, MatchResult, MatchingConfig, Offer, OfferQuery, Requirement, ScoringWeights};
use crate::core::{
    distance::distance_or,
    filters::{build_offer_query, matches_offer_query},
    scoring::calculate_match_score,
};
use crate::services::catalog::{CatalogAccess, CatalogError};

/// Number of results returned when the caller does not ask for a limit
pub const DEFAULT_LIMIT: usize = 5;

/// Errors that can occur while matching
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid requirement: {0}")]
    InvalidRequirement(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    /// Offers returned by the catalog before scoring
    pub total_candidates: usize,
}

/// Requirement-to-offer matching orchestrator
///
/// # Pipeline Stages
/// 1. Hard filters (pushed to the catalog, re-checked in-process)
/// 2. Authoritative radius cutoff and weighted scoring
/// 3. Result formatting
/// 4. Ranking and truncation
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
    weights: ScoringWeights,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig, weights: ScoringWeights) -> Self {
        Self { config, weights }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Reject requirements that would make filtering or scoring meaningless
    pub fn validate_requirement(requirement: &Requirement) -> Result<(), MatchError> {
        if !requirement.quantity.is_finite() || requirement.quantity <= 0.0 {
            return Err(MatchError::InvalidRequirement(format!(
                "quantity must be positive, got {}",
                requirement.quantity
            )));
        }

        if let Some(budget) = requirement.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(MatchError::InvalidRequirement(format!(
                    "budget must not be negative, got {}",
                    budget
                )));
            }
        }

        Ok(())
    }

    /// Build the catalog query for a requirement
    pub fn offer_query(&self, requirement: &Requirement, buyer: &Buyer) -> Result<OfferQuery, MatchError> {
        Self::validate_requirement(requirement)?;
        Ok(build_offer_query(requirement, buyer, &self.config))
    }

    /// Find the best offers for a requirement
    ///
    /// Fetches filtered candidates from `catalog`, then ranks them with
    /// [`MatchingEngine::rank_candidates`].
    pub async fn find_best_matches(
        &self,
        requirement: &Requirement,
        buyer: &Buyer,
        catalog: &dyn CatalogAccess,
        limit: usize,
    ) -> Result<MatchOutcome, MatchError> {
        let query = self.offer_query(requirement, buyer)?;
        let candidates = catalog.find_offers(&query).await?;

        tracing::debug!(
            "Catalog returned {} candidates for vendor {} ({} terms)",
            candidates.len(),
            buyer.vendor_id,
            query.search_terms.len()
        );

        self.rank_candidates(requirement, buyer, candidates, limit)
    }

    /// Score, sort and truncate already-fetched candidates
    ///
    /// Candidates violating a hard constraint are dropped here as well, so
    /// callers may pass an unfiltered list.
    pub fn rank_candidates(
        &self,
        requirement: &Requirement,
        buyer: &Buyer,
        candidates: Vec<Offer>,
        limit: usize,
    ) -> Result<MatchOutcome, MatchError> {
        let query = self.offer_query(requirement, buyer)?;
        let total_candidates = candidates.len();

        let mut matches: Vec<MatchResult> = candidates
            .into_iter()
            .filter(|offer| matches_offer_query(offer, &query))
            .filter_map(|offer| self.score_offer(requirement, buyer, offer))
            .collect();

        // Score descending, then nearest, then lowest supplier and product id
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.distance_km
                        .partial_cmp(&b.distance_km)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.supplier_id.cmp(&b.supplier_id))
                .then_with(|| a.product_id.cmp(&b.product_id))
        });

        matches.truncate(limit);

        Ok(MatchOutcome {
            matches,
            total_candidates,
        })
    }

    /// Score one offer and format it, or `None` if it is excluded
    fn score_offer(&self, requirement: &Requirement, buyer: &Buyer, offer: Offer) -> Option<MatchResult> {
        let distance_km = distance_or(
            buyer.latitude,
            buyer.longitude,
            offer.latitude,
            offer.longitude,
            self.config.fallback_distance_km,
        );

        let Some(breakdown) =
            calculate_match_score(&offer, requirement, distance_km, &self.config, &self.weights)
        else {
            tracing::trace!(
                "Offer {} excluded: {:.1}km exceeds {}km radius",
                offer.product_id,
                distance_km,
                self.config.max_distance_km
            );
            return None;
        };

        // Non-finite ratings from storage would otherwise ship as a null score
        if !breakdown.total.is_finite() || breakdown.total <= 0.0 {
            return None;
        }

        let total_cost = offer.price_per_unit * requirement.quantity;

        Some(MatchResult {
            product_id: offer.product_id,
            supplier_id: offer.supplier_id,
            supplier_name: offer.supplier_name,
            product_name: offer.product_name,
            category: offer.category,
            price_per_unit: offer.price_per_unit,
            unit_type: offer.unit_type,
            minimum_order_quantity: offer.minimum_order_quantity,
            available_quantity: offer.available_quantity,
            quality_score: offer.quality_score,
            trust_score: offer.trust_score,
            phone: offer.phone,
            supplier_location: offer.supplier_location,
            distance_km: round_to(distance_km, 1),
            total_cost: round_to(total_cost, 2),
            match_score: round_to(breakdown.total, 1),
            delivery_available: distance_km <= self.config.delivery_radius_km,
            video_verification_eligible: total_cost >= self.config.video_verification_threshold,
        })
    }
}

/// Round half away from zero to `places` decimals
#[inline]
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
