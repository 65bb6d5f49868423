// Integration tests for Supply Match

use supply_match::core::{MatchingEngine, MatchError, extract_requirement};
use supply_match::models::{Buyer, Offer, QualityPreference, Requirement, Urgency};
use supply_match::services::{CatalogAccess, InMemoryCatalog};

const BUYER_LAT: f64 = 28.6;
const BUYER_LON: f64 = 77.2;

/// Degrees of latitude per kilometer on a 6371km sphere
const DEG_PER_KM: f64 = 1.0 / 111.195;

fn create_test_buyer() -> Buyer {
    Buyer {
        vendor_id: 101,
        latitude: Some(BUYER_LAT),
        longitude: Some(BUYER_LON),
    }
}

/// Offer whose supplier sits `km_north` kilometers north of the buyer
fn create_test_offer(id: i64, name: &str, price_per_unit: f64, km_north: f64) -> Offer {
    Offer {
        product_id: id,
        supplier_id: 500 + id,
        supplier_name: format!("Supplier {}", id),
        product_name: name.to_string(),
        category: Some("vegetables".to_string()),
        price_per_unit,
        unit_type: "kg".to_string(),
        minimum_order_quantity: 1.0,
        available_quantity: 100.0,
        quality_score: 4.0,
        is_available: true,
        trust_score: 4.5,
        latitude: Some(BUYER_LAT + km_north * DEG_PER_KM),
        longitude: Some(BUYER_LON),
        phone: Some("+91-9810000000".to_string()),
        supplier_location: Some("Azadpur".to_string()),
        supplier_active: true,
    }
}

fn create_test_requirement(product_name: &str, quantity: f64, budget: Option<f64>) -> Requirement {
    Requirement {
        product_name: product_name.to_string(),
        quantity,
        unit: "kg".to_string(),
        budget,
        urgency: Urgency::Normal,
        quality_preference: QualityPreference::Good,
        location_preference: None,
        confidence_score: 0.9,
    }
}

#[test]
fn test_scenario_a_nearby_onions_within_budget() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("onions", 10.0, Some(300.0));
    let candidates = vec![create_test_offer(1, "Onions", 25.0, 3.0)];

    let outcome = engine
        .rank_candidates(&requirement, &create_test_buyer(), candidates, 5)
        .unwrap();

    assert_eq!(outcome.matches.len(), 1);
    let m = &outcome.matches[0];
    assert_eq!(m.total_cost, 250.0);
    assert_eq!(m.distance_km, 3.0);
    assert!(m.delivery_available);
    assert!(!m.video_verification_eligible);
    // 26.4 distance + 4.17 price + 16 quality + 13.5 trust + 10 availability
    assert_eq!(m.match_score, 70.1);
}

#[test]
fn test_scenario_b_far_offer_excluded() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("onions", 10.0, Some(300.0));

    let mut perfect = create_test_offer(1, "Onions", 1.0, 40.0);
    perfect.quality_score = 5.0;
    perfect.trust_score = 5.0;
    perfect.available_quantity = 10_000.0;

    let outcome = engine
        .rank_candidates(&requirement, &create_test_buyer(), vec![perfect], 5)
        .unwrap();

    assert!(outcome.matches.is_empty());
}

#[test]
fn test_radius_enforced_inside_bounding_box() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("onions", 10.0, None);

    // ~31km diagonal: inside the square pre-filter box, outside the 25km circle
    let mut corner = create_test_offer(1, "Onions", 20.0, 22.2);
    corner.longitude = Some(BUYER_LON + 0.22);

    let outcome = engine
        .rank_candidates(&requirement, &create_test_buyer(), vec![corner], 5)
        .unwrap();

    assert!(outcome.matches.is_empty());
}

#[test]
fn test_scenario_c_insufficient_stock_excluded() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("onions", 5.0, None);

    let mut scarce = create_test_offer(1, "Onions", 20.0, 1.0);
    scarce.available_quantity = 3.0;

    let outcome = engine
        .rank_candidates(&requirement, &create_test_buyer(), vec![scarce], 5)
        .unwrap();

    assert!(outcome.matches.is_empty());
}

#[test]
fn test_scenario_d_no_budget_neutral_price() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("onions", 10.0, None);
    let buyer = Buyer { vendor_id: 101, latitude: None, longitude: None };

    let candidates = vec![
        create_test_offer(1, "Onions", 5.0, 2.0),
        create_test_offer(2, "Onions", 500.0, 2.0),
    ];

    let outcome = engine.rank_candidates(&requirement, &buyer, candidates, 5).unwrap();

    assert_eq!(outcome.matches.len(), 2);
    // 24 distance (5km fallback) + 15 price + 16 quality + 13.5 trust + 10 availability
    assert_eq!(outcome.matches[0].match_score, 78.5);
    assert_eq!(outcome.matches[1].match_score, 78.5);
}

#[test]
fn test_over_budget_within_tolerance_still_ranked_lower() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("onions", 10.0, Some(300.0));

    let candidates = vec![
        create_test_offer(1, "Onions", 33.0, 2.0), // 330 total, inside tolerance
        create_test_offer(2, "Onions", 20.0, 2.0), // 200 total
        create_test_offer(3, "Onions", 36.0, 2.0), // 360 total, beyond tolerance
    ];

    let outcome = engine
        .rank_candidates(&requirement, &create_test_buyer(), candidates, 5)
        .unwrap();

    let ids: Vec<i64> = outcome.matches.iter().map(|m| m.product_id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_result_cap_and_descending_order() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("onions", 10.0, Some(1000.0));

    let candidates: Vec<Offer> = (0..20)
        .map(|i| {
            let mut offer = create_test_offer(i, "Onions", 10.0 + i as f64, (i % 7) as f64 * 3.0);
            offer.trust_score = (i % 5) as f64;
            offer
        })
        .collect();

    let outcome = engine
        .rank_candidates(&requirement, &create_test_buyer(), candidates, 5)
        .unwrap();

    assert_eq!(outcome.total_candidates, 20);
    assert_eq!(outcome.matches.len(), 5);
    for pair in outcome.matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score, "Matches not sorted by score");
    }
}

#[test]
fn test_name_filter_is_token_or() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("green chilies", 1.0, None);

    let mut ginger = create_test_offer(3, "Ginger", 80.0, 1.0);
    ginger.category = Some("spices".to_string());

    let candidates = vec![
        create_test_offer(1, "Hari Mirch (green)", 40.0, 1.0),
        create_test_offer(2, "Red Chilies", 60.0, 1.0),
        ginger,
    ];

    let outcome = engine
        .rank_candidates(&requirement, &create_test_buyer(), candidates, 5)
        .unwrap();

    let mut ids: Vec<i64> = outcome.matches.iter().map(|m| m.product_id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_any_product_sentinel_matches_everything() {
    let engine = MatchingEngine::default();
    let requirement = create_test_requirement("vegetables", 1.0, None);

    let mut ginger = create_test_offer(2, "Ginger", 80.0, 1.0);
    ginger.category = None;

    let outcome = engine
        .rank_candidates(
            &requirement,
            &create_test_buyer(),
            vec![create_test_offer(1, "Onions", 20.0, 1.0), ginger],
            5,
        )
        .unwrap();

    assert_eq!(outcome.matches.len(), 2);
}

#[tokio::test]
async fn test_find_best_matches_through_catalog() {
    let catalog = InMemoryCatalog::new(vec![
        create_test_offer(1, "Onions", 25.0, 3.0),
        create_test_offer(2, "Onions", 22.0, 12.0),
        create_test_offer(3, "Tomatoes", 18.0, 1.0),
        create_test_offer(4, "Onions", 20.0, 60.0),
    ])
    .with_buyer(create_test_buyer());

    let engine = MatchingEngine::default();
    let buyer = catalog.find_buyer(101).await.unwrap().unwrap();
    let requirement = create_test_requirement("onions", 10.0, Some(300.0));

    let outcome = engine
        .find_best_matches(&requirement, &buyer, &catalog, 5)
        .await
        .unwrap();

    // The 60km offer never leaves the catalog
    assert_eq!(outcome.total_candidates, 2);
    let ids: Vec<i64> = outcome.matches.iter().map(|m| m.product_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_find_best_matches_rejects_invalid_requirement() {
    let catalog = InMemoryCatalog::new(vec![create_test_offer(1, "Onions", 25.0, 3.0)]);
    let engine = MatchingEngine::default();

    let result = engine
        .find_best_matches(
            &create_test_requirement("onions", 0.0, None),
            &create_test_buyer(),
            &catalog,
            5,
        )
        .await;

    assert!(matches!(result, Err(MatchError::InvalidRequirement(_))));
}

#[test]
fn test_blocking_caller_from_extracted_message() {
    let catalog = InMemoryCatalog::new(vec![
        create_test_offer(1, "Onions", 25.0, 3.0),
        create_test_offer(2, "Potatoes", 15.0, 3.0),
    ]);
    let engine = MatchingEngine::default();
    let requirement = extract_requirement("10 किलो प्याज चाहिए बजट 300");

    let outcome = tokio_test::block_on(engine.find_best_matches(
        &requirement,
        &create_test_buyer(),
        &catalog,
        5,
    ))
    .unwrap();

    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].product_name, "Onions");
    assert_eq!(outcome.matches[0].total_cost, 250.0);
}
