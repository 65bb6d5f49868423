use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use crate::core::filters::matches_offer_query;
use crate::models::{Buyer, Offer, OfferQuery};

/// Errors that can occur when reading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Read access to the product catalog and vendor locations
///
/// Implementations should apply every constraint in [`OfferQuery`] at the
/// storage layer. The matching engine re-checks them in-process, so an
/// implementation that over-returns is still correct, only slower.
#[async_trait]
pub trait CatalogAccess: Send + Sync {
    /// Offers satisfying the hard constraints, in a stable order
    async fn find_offers(&self, query: &OfferQuery) -> Result<Vec<Offer>, CatalogError>;

    /// Look up a vendor's location
    async fn find_buyer(&self, vendor_id: i64) -> Result<Option<Buyer>, CatalogError>;

    /// Whether the backing store is reachable
    async fn health_check(&self) -> Result<bool, CatalogError> {
        Ok(true)
    }
}

/// Catalog held in memory
///
/// Filters in-process; suitable for tests and small catalogs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    offers: Vec<Offer>,
    buyers: HashMap<i64, Buyer>,
}

impl InMemoryCatalog {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self {
            offers,
            buyers: HashMap::new(),
        }
    }

    /// Register a vendor so `find_buyer` can resolve it
    pub fn with_buyer(mut self, buyer: Buyer) -> Self {
        self.buyers.insert(buyer.vendor_id, buyer);
        self
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }
}

#[async_trait]
impl CatalogAccess for InMemoryCatalog {
    async fn find_offers(&self, query: &OfferQuery) -> Result<Vec<Offer>, CatalogError> {
        let offers: Vec<Offer> = self
            .offers
            .iter()
            .filter(|offer| matches_offer_query(offer, query))
            .cloned()
            .collect();

        tracing::trace!("In-memory catalog returned {} of {} offers", offers.len(), self.offers.len());

        Ok(offers)
    }

    async fn find_buyer(&self, vendor_id: i64) -> Result<Option<Buyer>, CatalogError> {
        Ok(self.buyers.get(&vendor_id).cloned())
    }
}
