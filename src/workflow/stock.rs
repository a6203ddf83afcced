//! Stock checkers.
//!
//! `DeclaredStock` trusts the availability flags the caller supplied on
//! the cart. `CatalogStock` annotates each item from the live catalog,
//! comparing requested quantity against remaining stock. The availability
//! read is advisory either way: the authoritative check is the conditional
//! decrement at billing time.

use std::sync::Arc;

use super::traits::StockChecker;
use super::types::{CartItem, StockReport};
use super::WorkflowError;
use crate::db::CatalogRepository;

/// Trusts caller-supplied `in_stock` flags.
pub struct DeclaredStock;

impl StockChecker for DeclaredStock {
    fn check(&self, items: &[CartItem]) -> Result<StockReport, WorkflowError> {
        let all_available = items.iter().all(|item| item.in_stock);
        Ok(StockReport {
            all_available,
            items: items.to_vec(),
        })
    }
}

/// Annotates availability from the catalog's current stock levels.
pub struct CatalogStock {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogStock {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }
}

impl StockChecker for CatalogStock {
    fn check(&self, items: &[CartItem]) -> Result<StockReport, WorkflowError> {
        let mut annotated = Vec::with_capacity(items.len());
        let mut all_available = true;
        for item in items {
            let in_stock = match self.catalog.find_medicine(&item.name)? {
                Some(entry) => entry.stock >= item.quantity,
                None => false,
            };
            if !in_stock {
                tracing::info!(name = %item.name, quantity = item.quantity, "Item unavailable");
                all_available = false;
            }
            annotated.push(CartItem {
                in_stock,
                ..item.clone()
            });
        }
        Ok(StockReport {
            all_available,
            items: annotated,
        })
    }
}
