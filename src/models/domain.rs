use serde::{Deserialize, Serialize};

/// Product name meaning "any produce"; disables the name filter
pub const ANY_PRODUCT: &str = "vegetables";

/// How soon the vendor needs the goods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    #[default]
    Normal,
    Flexible,
}

/// Quality tier requested by the vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreference {
    Premium,
    #[default]
    Good,
    Basic,
}

impl QualityPreference {
    /// Lowest product quality score accepted for this tier
    pub fn min_quality_score(self) -> Option<f64> {
        match self {
            QualityPreference::Premium => Some(4.0),
            QualityPreference::Good => Some(3.0),
            QualityPreference::Basic => None,
        }
    }
}

/// Structured procurement need, already extracted from the vendor's message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(rename = "productName")]
    pub product_name: String,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Total budget for the whole quantity, not a unit price
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(rename = "qualityPreference", default)]
    pub quality_preference: QualityPreference,
    #[serde(rename = "locationPreference", default)]
    pub location_preference: Option<String>,
    #[serde(rename = "confidenceScore", default = "default_confidence")]
    pub confidence_score: f64,
}

impl Requirement {
    /// Budget only counts when it is strictly positive
    pub fn effective_budget(&self) -> Option<f64> {
        self.budget.filter(|budget| *budget > 0.0)
    }

    /// Whether the product name narrows the search at all
    pub fn is_any_product(&self) -> bool {
        let name = self.product_name.trim();
        name.is_empty() || name.eq_ignore_ascii_case(ANY_PRODUCT)
    }
}

fn default_unit() -> String { "kg".to_string() }
fn default_confidence() -> f64 { 1.0 }

/// The vendor placing the requirement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(rename = "vendorId")]
    pub vendor_id: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Buyer {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// A product listed by a supplier, joined with the supplier's attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    #[serde(rename = "productId")]
    pub product_id: i64,
    #[serde(rename = "supplierId")]
    pub supplier_id: i64,
    #[serde(rename = "supplierName")]
    pub supplier_name: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "pricePerUnit")]
    pub price_per_unit: f64,
    #[serde(rename = "unitType")]
    pub unit_type: String,
    #[serde(rename = "minimumOrderQuantity")]
    pub minimum_order_quantity: f64,
    #[serde(rename = "availableQuantity")]
    pub available_quantity: f64,
    #[serde(rename = "qualityScore")]
    pub quality_score: f64,
    #[serde(rename = "isAvailable", default = "default_true")]
    pub is_available: bool,
    #[serde(rename = "trustScore")]
    pub trust_score: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "supplierLocation", default)]
    pub supplier_location: Option<String>,
    #[serde(rename = "supplierActive", default = "default_true")]
    pub supplier_active: bool,
}

fn default_true() -> bool { true }

/// Ranked offer returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "productId")]
    pub product_id: i64,
    #[serde(rename = "supplierId")]
    pub supplier_id: i64,
    #[serde(rename = "supplierName")]
    pub supplier_name: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub category: Option<String>,
    #[serde(rename = "pricePerUnit")]
    pub price_per_unit: f64,
    #[serde(rename = "unitType")]
    pub unit_type: String,
    #[serde(rename = "minimumOrderQuantity")]
    pub minimum_order_quantity: f64,
    #[serde(rename = "availableQuantity")]
    pub available_quantity: f64,
    #[serde(rename = "qualityScore")]
    pub quality_score: f64,
    #[serde(rename = "trustScore")]
    pub trust_score: f64,
    pub phone: Option<String>,
    #[serde(rename = "supplierLocation")]
    pub supplier_location: Option<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "deliveryAvailable")]
    pub delivery_available: bool,
    #[serde(rename = "videoVerificationEligible")]
    pub video_verification_eligible: bool,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    /// `None` when the box wraps the antimeridian or a pole
    pub lon_range: Option<(f64, f64)>,
}

/// Hard constraints handed to the catalog
#[derive(Debug, Clone)]
pub struct OfferQuery {
    pub quantity: f64,
    /// Lower-cased name tokens; empty means any product
    pub search_terms: Vec<String>,
    pub max_price_per_unit: Option<f64>,
    pub min_quality_score: Option<f64>,
    pub bounding_box: Option<BoundingBox>,
}

/// Matching limits and thresholds
#[derive(Debug, Clone, Copy)]
pub struct MatchingConfig {
    pub max_distance_km: f64,
    pub price_tolerance: f64,
    pub fallback_distance_km: f64,
    pub delivery_radius_km: f64,
    pub video_verification_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_distance_km: 25.0,
            price_tolerance: 0.15,
            fallback_distance_km: 5.0,
            delivery_radius_km: 10.0,
            video_verification_threshold: 1000.0,
        }
    }
}

/// Scoring weights, in points out of 100
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub distance: f64,
    pub price: f64,
    pub quality: f64,
    pub trust: f64,
    pub availability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 30.0,
            price: 25.0,
            quality: 20.0,
            trust: 15.0,
            availability: 10.0,
        }
    }
}
