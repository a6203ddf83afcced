//! Catalog storage — canonical medicines, the doctor registry, and the
//! invoice journal.
//!
//! The pipeline and workflow never own the store; they see it through the
//! `CatalogRepository` trait so the SQLite-backed catalog and the in-memory
//! test catalog are interchangeable.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryCatalog;
pub use sqlite::SqliteCatalog;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// A canonical sellable medicine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub price: f64,
    pub tax_percent: f64,
    pub stock: u32,
}

/// Read access to the medicine catalog and the doctor registry, plus the
/// two writes the order workflow performs: stock decrement and invoice
/// journaling.
pub trait CatalogRepository: Send + Sync {
    /// Canonical medicine names in stable catalog iteration order.
    /// Fuzzy-match tie-breaking depends on this order being deterministic.
    fn medicine_names(&self) -> Result<Vec<String>, CatalogError>;

    fn find_medicine(&self, name: &str) -> Result<Option<CatalogEntry>, CatalogError>;

    /// Atomically decrement stock if at least `quantity` units remain.
    /// Returns false when the catalog has no such row or not enough stock;
    /// stock can never go negative. Callers must check the returned flag.
    fn decrement_stock(&self, name: &str, quantity: u32) -> Result<bool, CatalogError>;

    /// Return previously decremented units (billing rollback).
    fn increment_stock(&self, name: &str, quantity: u32) -> Result<(), CatalogError>;

    /// Membership test against the doctor registry. No partial matching.
    fn registration_exists(&self, registration: &str) -> Result<bool, CatalogError>;

    /// Append a generated invoice to the journal.
    fn record_invoice(&self, invoice_id: &str, total: f64) -> Result<(), CatalogError>;
}
