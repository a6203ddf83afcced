//! Billing against the catalog.
//!
//! Prices and tax come from the catalog row for each item; the stock
//! decrement uses the repository's conditional decrement, so a cart can
//! never oversell a medicine that a concurrent order drained first. If a
//! later line fails, decrements already applied for earlier lines are
//! returned before the error propagates.

use std::sync::Arc;

use uuid::Uuid;

use super::traits::BillingProcessor;
use super::types::{CartItem, Invoice, InvoiceLine};
use super::WorkflowError;
use crate::db::CatalogRepository;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct CatalogBilling {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogBilling {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }
}

impl BillingProcessor for CatalogBilling {
    fn bill(&self, items: &[CartItem]) -> Result<Invoice, WorkflowError> {
        let mut lines = Vec::with_capacity(items.len());
        let mut subtotal = 0.0;
        let mut tax = 0.0;
        let mut decremented: Vec<(&str, u32)> = Vec::new();

        for item in items {
            let entry = match self.catalog.find_medicine(&item.name) {
                Ok(Some(entry)) => entry,
                Ok(None) => {
                    restock(&*self.catalog, &decremented);
                    return Err(WorkflowError::UnknownItem(item.name.clone()));
                }
                Err(e) => {
                    restock(&*self.catalog, &decremented);
                    return Err(e.into());
                }
            };

            if !self.catalog.decrement_stock(&item.name, item.quantity)? {
                restock(&*self.catalog, &decremented);
                return Err(WorkflowError::InsufficientStock {
                    name: item.name.clone(),
                    requested: item.quantity,
                });
            }
            decremented.push((&item.name, item.quantity));

            let total_price = entry.price * item.quantity as f64;
            subtotal += total_price;
            tax += total_price * (entry.tax_percent / 100.0);
            lines.push(InvoiceLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: entry.price,
                total_price,
            });
        }

        let invoice_id = Uuid::new_v4().simple().to_string()[..8].to_string();
        let tax = round2(tax);
        let invoice = Invoice {
            invoice_id,
            date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            items: lines,
            subtotal: round2(subtotal),
            tax,
            total: round2(subtotal + tax),
        };

        self.catalog.record_invoice(&invoice.invoice_id, invoice.total)?;
        tracing::info!(invoice_id = %invoice.invoice_id, total = invoice.total, "Invoice generated");
        Ok(invoice)
    }
}

/// Return units taken before a failed line. Best effort: a rollback
/// failure only logs, since the original error is the one worth raising.
fn restock(catalog: &dyn CatalogRepository, decremented: &[(&str, u32)]) {
    for (name, quantity) in decremented {
        if let Err(e) = catalog.increment_stock(name, *quantity) {
            tracing::warn!(name = %name, quantity = *quantity, error = %e, "Failed to restock after billing error");
        }
    }
}
