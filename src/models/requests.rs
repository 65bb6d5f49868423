use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Requirement;

/// Request to find matching offers for a vendor
///
/// Either a structured `requirement` or a free-form `message` must be given.
/// When both are present the structured requirement wins.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "vendor_id", rename = "vendorId")]
    pub vendor_id: i64,
    #[serde(default)]
    pub requirement: Option<Requirement>,
    #[validate(length(min = 1, max = 1000))]
    #[serde(default)]
    pub message: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to turn a free-form message into a requirement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtractRequirementRequest {
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
}
