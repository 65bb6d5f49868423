use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::models::{Buyer, Offer, OfferQuery};
use crate::services::catalog::{CatalogAccess, CatalogError};

/// Joined product/supplier lookup with every hard constraint pushed into SQL
///
/// $1 quantity, $2 ILIKE patterns (empty = any product), $3 max unit price,
/// $4 min quality, $5..$6 latitude bounds, $7..$8 longitude bounds.
const FIND_OFFERS_QUERY: &str = r#"
    SELECT
        p.id AS product_id,
        s.id AS supplier_id,
        COALESCE(NULLIF(s.business_name, ''), s.name) AS supplier_name,
        p.name AS product_name,
        p.category,
        p.price_per_unit,
        p.unit_type,
        p.minimum_order_quantity,
        p.available_quantity,
        p.quality_score,
        p.is_available,
        s.trust_score,
        s.latitude,
        s.longitude,
        s.phone,
        s.location AS supplier_location,
        s.is_active AS supplier_active
    FROM products p
    JOIN suppliers s ON p.supplier_id = s.id
    WHERE p.is_available = TRUE
      AND s.is_active = TRUE
      AND p.available_quantity >= $1
      AND p.minimum_order_quantity <= $1
      AND (cardinality($2::text[]) = 0
           OR p.name ILIKE ANY($2::text[])
           OR p.category ILIKE ANY($2::text[]))
      AND ($3::float8 IS NULL OR p.price_per_unit <= $3)
      AND ($4::float8 IS NULL OR p.quality_score >= $4)
      AND ($5::float8 IS NULL
           OR s.latitude IS NULL
           OR s.longitude IS NULL
           OR (s.latitude BETWEEN $5 AND $6::float8
               AND ($7::float8 IS NULL OR s.longitude BETWEEN $7 AND $8::float8)))
    ORDER BY p.id
"#;

/// PostgreSQL-backed catalog
///
/// Read-only with respect to products, suppliers and vendors; the only
/// writes are the embedded schema migrations run at startup.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new catalog from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new catalog from settings, filling in pool defaults
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, CatalogError> {
        tracing::info!("Connecting to PostgreSQL catalog");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

#[async_trait]
impl CatalogAccess for PostgresCatalog {
    async fn find_offers(&self, query: &OfferQuery) -> Result<Vec<Offer>, CatalogError> {
        let patterns = like_patterns(&query.search_terms);
        let (min_lat, max_lat) = query
            .bounding_box
            .map(|bbox| (Some(bbox.min_lat), Some(bbox.max_lat)))
            .unwrap_or((None, None));
        let (min_lon, max_lon) = query
            .bounding_box
            .and_then(|bbox| bbox.lon_range)
            .map(|(min, max)| (Some(min), Some(max)))
            .unwrap_or((None, None));

        let rows = sqlx::query(FIND_OFFERS_QUERY)
            .bind(query.quantity)
            .bind(patterns)
            .bind(query.max_price_per_unit)
            .bind(query.min_quality_score)
            .bind(min_lat)
            .bind(max_lat)
            .bind(min_lon)
            .bind(max_lon)
            .fetch_all(&self.pool)
            .await?;

        let offers = rows
            .iter()
            .map(offer_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Catalog query returned {} offers", offers.len());

        Ok(offers)
    }

    async fn find_buyer(&self, vendor_id: i64) -> Result<Option<Buyer>, CatalogError> {
        let query = r#"
            SELECT id, latitude, longitude
            FROM vendors
            WHERE id = $1 AND is_active = TRUE
        "#;

        let row = sqlx::query(query)
            .bind(vendor_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| -> Result<Buyer, CatalogError> {
            Ok(Buyer {
                vendor_id: row.try_get("id")?,
                latitude: row.try_get("latitude")?,
                longitude: row.try_get("longitude")?,
            })
        })
        .transpose()
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, CatalogError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn offer_from_row(row: &PgRow) -> Result<Offer, sqlx::Error> {
    Ok(Offer {
        product_id: row.try_get("product_id")?,
        supplier_id: row.try_get("supplier_id")?,
        supplier_name: row.try_get("supplier_name")?,
        product_name: row.try_get("product_name")?,
        category: row.try_get("category")?,
        price_per_unit: row.try_get("price_per_unit")?,
        unit_type: row.try_get("unit_type")?,
        minimum_order_quantity: row.try_get("minimum_order_quantity")?,
        available_quantity: row.try_get("available_quantity")?,
        quality_score: row.try_get("quality_score")?,
        is_available: row.try_get("is_available")?,
        trust_score: row.try_get("trust_score")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        phone: row.try_get("phone")?,
        supplier_location: row.try_get("supplier_location")?,
        supplier_active: row.try_get("supplier_active")?,
    })
}

/// Turn search terms into `%term%` ILIKE patterns
pub fn like_patterns(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|term| format!("%{}%", escape_like(term)))
        .collect()
}

/// Escape LIKE wildcards so user text matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
