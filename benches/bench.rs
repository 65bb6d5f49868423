// Criterion benchmarks for Supply Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use supply_match::core::{MatchingEngine, extract_requirement, distance::{haversine_distance, calculate_bounding_box}};
use supply_match::models::{Buyer, Offer, QualityPreference, Requirement, Urgency};

const BUYER_LAT: f64 = 28.6139;
const BUYER_LON: f64 = 77.2090;

fn create_offer(id: usize, lat: f64, lon: f64) -> Offer {
    Offer {
        product_id: id as i64,
        supplier_id: (id / 3) as i64,
        supplier_name: format!("Supplier {}", id / 3),
        product_name: if id % 4 == 0 { "Red Onions" } else { "Onions" }.to_string(),
        category: Some("vegetables".to_string()),
        price_per_unit: 18.0 + (id % 15) as f64,
        unit_type: "kg".to_string(),
        minimum_order_quantity: 1.0,
        available_quantity: 5.0 + (id % 40) as f64,
        quality_score: 3.0 + (id % 3) as f64 * 0.5,
        is_available: true,
        trust_score: (id % 6) as f64 * 0.8,
        latitude: Some(lat),
        longitude: Some(lon),
        phone: None,
        supplier_location: None,
        supplier_active: true,
    }
}

fn create_requirement() -> Requirement {
    Requirement {
        product_name: "onions".to_string(),
        quantity: 10.0,
        unit: "kg".to_string(),
        budget: Some(300.0),
        urgency: Urgency::Normal,
        quality_preference: QualityPreference::Good,
        location_preference: None,
        confidence_score: 1.0,
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(BUYER_LAT),
                black_box(BUYER_LON),
                black_box(28.7041),
                black_box(77.1025),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| {
            calculate_bounding_box(
                black_box(BUYER_LAT),
                black_box(BUYER_LON),
                black_box(25.0),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let engine = MatchingEngine::default();
    let requirement = create_requirement();
    let buyer = Buyer {
        vendor_id: 1,
        latitude: Some(BUYER_LAT),
        longitude: Some(BUYER_LON),
    };

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Offer> = (0..*candidate_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.0007) % 0.3;
                let lon_offset = (i as f64 * 0.0011) % 0.3;
                create_offer(i, BUYER_LAT + lat_offset, BUYER_LON - lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("rank_candidates", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    engine.rank_candidates(
                        black_box(&requirement),
                        black_box(&buyer),
                        black_box(candidates.clone()),
                        black_box(5),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let messages = [
        "10 किलो प्याज चाहिए बजट 300",
        "Need 5kg tomatoes urgently, budget 150 rupees",
        "2.5 kilo aloo chahiye jaldi",
    ];

    c.bench_function("extract_requirement", |b| {
        b.iter(|| {
            for message in messages.iter() {
                black_box(extract_requirement(black_box(message)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_ranking,
    bench_extraction
);

criterion_main!(benches);
