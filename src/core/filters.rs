use crate::models::{Buyer, MatchingConfig, Offer, OfferQuery, Requirement};
use crate::core::distance::{calculate_bounding_box, is_within_bounding_box};

/// Relative slack so an offer priced exactly at the tolerance ceiling survives float error
const PRICE_RELATIVE_EPSILON: f64 = 1e-12;

/// Split a product name into lower-cased search tokens
///
/// Returns no tokens for the "any product" sentinel, which disables name matching.
pub fn search_terms(requirement: &Requirement) -> Vec<String> {
    if requirement.is_any_product() {
        return Vec::new();
    }

    requirement
        .product_name
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Highest unit price that keeps the full order within budget plus tolerance
///
/// `None` when no positive budget was given.
pub fn max_price_per_unit(requirement: &Requirement, price_tolerance: f64) -> Option<f64> {
    requirement
        .effective_budget()
        .map(|budget| budget * (1.0 + price_tolerance) / requirement.quantity * (1.0 + PRICE_RELATIVE_EPSILON))
}

/// Build the hard-constraint query handed to the catalog
///
/// The caller must have rejected non-positive quantities already.
pub fn build_offer_query(
    requirement: &Requirement,
    buyer: &Buyer,
    config: &MatchingConfig,
) -> OfferQuery {
    let bounding_box = buyer
        .coordinates()
        .map(|(lat, lon)| calculate_bounding_box(lat, lon, config.max_distance_km));

    OfferQuery {
        quantity: requirement.quantity,
        search_terms: search_terms(requirement),
        max_price_per_unit: max_price_per_unit(requirement, config.price_tolerance),
        min_quality_score: requirement.quality_preference.min_quality_score(),
        bounding_box,
    }
}

/// Lenient name match: any token found in the product name or category
#[inline]
pub fn matches_search_terms(offer: &Offer, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }

    let name = offer.product_name.to_lowercase();
    let category = offer
        .category
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    terms
        .iter()
        .any(|term| name.contains(term.as_str()) || category.contains(term.as_str()))
}

/// Check if an offer satisfies every hard constraint of the query
///
/// This is the in-process mirror of the catalog query.
#[inline]
pub fn matches_offer_query(offer: &Offer, query: &OfferQuery) -> bool {
    if !offer.is_available || !offer.supplier_active {
        return false;
    }

    if offer.available_quantity < query.quantity {
        return false;
    }

    if offer.minimum_order_quantity > query.quantity {
        return false;
    }

    if !matches_search_terms(offer, &query.search_terms) {
        return false;
    }

    if let Some(max_price) = query.max_price_per_unit {
        if offer.price_per_unit > max_price {
            return false;
        }
    }

    if let Some(min_quality) = query.min_quality_score {
        if offer.quality_score < min_quality {
            return false;
        }
    }

    // Suppliers without coordinates always pass; they score at the fallback distance
    if let (Some(bbox), Some(lat), Some(lon)) = (&query.bounding_box, offer.latitude, offer.longitude) {
        if !is_within_bounding_box(lat, lon, bbox) {
            return false;
        }
    }

    true
}
