// Service exports
pub mod catalog;
pub mod postgres;

pub use catalog::{CatalogAccess, CatalogError, InMemoryCatalog};
pub use postgres::PostgresCatalog;
