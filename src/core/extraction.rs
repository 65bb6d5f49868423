//! Keyword-based requirement extraction.
//!
//! Turns short, possibly Hindi/English code-mixed vendor messages such as
//! `"10 किलो प्याज चाहिए बजट 300"` into a [`Requirement`]. This is the
//! fallback used when no language model is available, so it only looks for
//! a known product keyword, the first number, a number following a budget
//! keyword and an urgency keyword.

use regex::Regex;
use std::sync::OnceLock;
use crate::models::{QualityPreference, Requirement, Urgency, ANY_PRODUCT};

/// Confidence reported for heuristic extractions
pub const HEURISTIC_CONFIDENCE: f64 = 0.6;

/// Keyword to canonical product, checked in order
const PRODUCT_KEYWORDS: &[(&str, &str)] = &[
    ("onion", "onions"),
    ("प्याज", "onions"),
    ("pyaz", "onions"),
    ("tomato", "tomatoes"),
    ("टमाटर", "tomatoes"),
    ("tamatar", "tomatoes"),
    ("potato", "potatoes"),
    ("आलू", "potatoes"),
    ("aloo", "potatoes"),
    ("chili", "green chilies"),
    ("मिर्च", "green chilies"),
    ("mirch", "green chilies"),
    ("ginger", "ginger"),
    ("अदरक", "ginger"),
    ("adrak", "ginger"),
    ("garlic", "garlic"),
    ("लहसुन", "garlic"),
    ("lahsun", "garlic"),
];

const URGENT_KEYWORDS: &[&str] = &["urgent", "जल्दी", "jaldi"];

fn quantity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("quantity regex must compile"))
}

/// Amount starting at most 10 characters past a budget keyword
fn budget_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)(?:budget|बजट|rupees|रुपये).{0,10}?([0-9]+(?:\.[0-9]+)?)")
            .expect("budget regex must compile")
    })
}

/// Extract a requirement from a free-form vendor message
pub fn extract_requirement(message: &str) -> Requirement {
    let text: String = message
        .to_lowercase()
        .chars()
        .map(normalize_digit)
        .collect();

    let product_name = PRODUCT_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, product)| product.to_string())
        .unwrap_or_else(|| ANY_PRODUCT.to_string());

    let quantity = quantity_re()
        .find(&text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1.0);

    let budget = budget_re()
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    let urgency = if URGENT_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        Urgency::Urgent
    } else {
        Urgency::Normal
    };

    tracing::debug!(
        "Heuristic extraction: product={}, quantity={}, budget={:?}, urgency={:?}",
        product_name,
        quantity,
        budget,
        urgency
    );

    Requirement {
        product_name,
        quantity,
        unit: "kg".to_string(),
        budget,
        urgency,
        quality_preference: QualityPreference::Good,
        location_preference: None,
        confidence_score: HEURISTIC_CONFIDENCE,
    }
}

/// Map Devanagari digits to ASCII so `१०` reads as `10`
fn normalize_digit(c: char) -> char {
    match c {
        '०'..='९' => {
            let offset = c as u32 - '०' as u32;
            char::from_digit(offset, 10).unwrap_or(c)
        }
        _ => c,
    }
}
