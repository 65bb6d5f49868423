use crate::models::BoundingBox;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance assumed when either party has no coordinates
pub const DEFAULT_DISTANCE_KM: f64 = 5.0;

/// Kilometers per degree of latitude, rounded down so boxes err on the large side
const KM_PER_DEGREE: f64 = 111.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points
    let c = 2.0 * a.sqrt().clamp(-1.0, 1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Distance between two optional locations, falling back to `fallback_km`
/// when any coordinate is unknown
#[inline]
pub fn distance_or(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
    fallback_km: f64,
) -> f64 {
    match (lat1, lon1, lat2, lon2) {
        (Some(lat1), Some(lon1), Some(lat2), Some(lon2)) => {
            haversine_distance(lat1, lon1, lat2, lon2)
        }
        _ => fallback_km,
    }
}

/// [`distance_or`] with the standard 5 km fallback
#[inline]
pub fn distance_km(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
) -> f64 {
    distance_or(lat1, lon1, lat2, lon2, DEFAULT_DISTANCE_KM)
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine for pre-filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// Longitude bounds are dropped when the box would cross the antimeridian
/// or reach a pole, so the box never excludes a point inside the radius.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;
    let min_lat = (lat - lat_delta).max(-90.0);
    let max_lat = (lat + lat_delta).min(90.0);

    // Widest parallel inside the box decides the longitude span
    let widest_lat = lat.abs() + lat_delta;
    let lon_range = if widest_lat >= 90.0 {
        None
    } else {
        let lon_delta = radius_km / (KM_PER_DEGREE * widest_lat.to_radians().cos());
        let (min_lon, max_lon) = (lon - lon_delta, lon + lon_delta);
        if min_lon < -180.0 || max_lon > 180.0 {
            None
        } else {
            Some((min_lon, max_lon))
        }
    };

    BoundingBox { min_lat, max_lat, lon_range }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    if lat < bbox.min_lat || lat > bbox.max_lat {
        return false;
    }

    match bbox.lon_range {
        Some((min_lon, max_lon)) => lon >= min_lon && lon <= max_lon,
        None => true,
    }
}
