use crate::models::{MatchingConfig, Offer, Requirement, ScoringWeights};

/// Share of the price weight granted to offers inside the tolerance zone
const OVER_BUDGET_PRICE_SHARE: f64 = 0.2;

/// Share of the price weight granted when no budget was stated
const NO_BUDGET_PRICE_SHARE: f64 = 0.6;

/// Upper bound of the quality and trust scales
const RATING_SCALE: f64 = 5.0;

const MAX_SCORE: f64 = 100.0;

/// Per-component points behind a match score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub distance: f64,
    pub price: f64,
    pub quality: f64,
    pub trust: f64,
    pub availability: f64,
    pub total: f64,
}

/// Calculate a match score (0-100) for an offer against a requirement
///
/// Scoring formula at default weights:
/// score = (
///     distance_score   (30) +   # linear decay to 0 at the radius
///     price_score      (25) +   # savings relative to budget
///     quality_score    (20) +   # quality_score / 5
///     trust_score      (15) +   # supplier trust_score / 5
///     availability     (10)     # stock headroom over the requested quantity
/// )
///
/// Returns `None` when the offer lies beyond `max_distance_km`; such offers
/// are excluded no matter how well they score elsewhere.
pub fn calculate_match_score(
    offer: &Offer,
    requirement: &Requirement,
    distance_km: f64,
    config: &MatchingConfig,
    weights: &ScoringWeights,
) -> Option<ScoreBreakdown> {
    let distance = calculate_distance_score(distance_km, config.max_distance_km, weights.distance)?;

    let total_cost = offer.price_per_unit * requirement.quantity;
    let price = calculate_price_score(total_cost, requirement.effective_budget(), weights.price);

    let quality = offer.quality_score / RATING_SCALE * weights.quality;
    let trust = offer.trust_score / RATING_SCALE * weights.trust;

    let availability = calculate_availability_score(
        offer.available_quantity,
        requirement.quantity,
        weights.availability,
    );

    let total = (distance + price + quality + trust + availability).clamp(0.0, MAX_SCORE);

    Some(ScoreBreakdown {
        distance,
        price,
        quality,
        trust,
        availability,
        total,
    })
}

/// Distance points, linear from `weight` at 0 km to 0 at the radius
///
/// `None` past the radius.
#[inline]
pub fn calculate_distance_score(distance_km: f64, max_distance_km: f64, weight: f64) -> Option<f64> {
    if distance_km > max_distance_km {
        return None;
    }

    Some(((max_distance_km - distance_km) / max_distance_km * weight).max(0.0))
}

/// Price points for the full order cost
#[inline]
pub fn calculate_price_score(total_cost: f64, budget: Option<f64>, weight: f64) -> f64 {
    match budget {
        Some(budget) if total_cost <= budget => ((budget - total_cost) / budget * weight).max(0.0),
        Some(_) => weight * OVER_BUDGET_PRICE_SHARE,
        None => weight * NO_BUDGET_PRICE_SHARE,
    }
}

/// Availability points: full weight at twice the requested stock, half at exactly enough
#[inline]
pub fn calculate_availability_score(available: f64, requested: f64, weight: f64) -> f64 {
    if available >= requested * 2.0 {
        weight
    } else if available >= requested {
        weight / 2.0
    } else {
        0.0
    }
}
