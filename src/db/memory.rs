//! In-memory catalog for tests and single-process setups.
//!
//! Mirrors the SQLite catalog's semantics, including the conditional stock
//! decrement: the check and the subtraction happen under one lock.

use std::collections::HashSet;
use std::sync::Mutex;

use super::{CatalogEntry, CatalogError, CatalogRepository};

#[derive(Default)]
struct Inner {
    // Vec, not a map: catalog iteration order is part of the matcher contract
    medicines: Vec<CatalogEntry>,
    registry: HashSet<String>,
    invoices: Vec<(String, f64)>,
}

#[derive(Default)]
pub struct InMemoryCatalog {
    inner: Mutex<Inner>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_medicines(entries: Vec<CatalogEntry>) -> Self {
        let catalog = Self::new();
        {
            let mut inner = catalog.inner.lock().unwrap();
            inner.medicines = entries;
        }
        catalog
    }

    pub fn add_medicine(&self, entry: CatalogEntry) {
        self.inner.lock().unwrap().medicines.push(entry);
    }

    pub fn add_registration(&self, registration: &str) {
        self.inner
            .lock()
            .unwrap()
            .registry
            .insert(registration.to_string());
    }

    /// Invoices recorded so far (id, total), in journal order.
    pub fn invoices(&self) -> Vec<(String, f64)> {
        self.inner.lock().unwrap().invoices.clone()
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn medicine_names(&self) -> Result<Vec<String>, CatalogError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.medicines.iter().map(|m| m.name.clone()).collect())
    }

    fn find_medicine(&self, name: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.medicines.iter().find(|m| m.name == name).cloned())
    }

    fn decrement_stock(&self, name: &str, quantity: u32) -> Result<bool, CatalogError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.medicines.iter_mut().find(|m| m.name == name) {
            Some(entry) if entry.stock >= quantity => {
                entry.stock -= quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn increment_stock(&self, name: &str, quantity: u32) -> Result<(), CatalogError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(entry) = inner.medicines.iter_mut().find(|m| m.name == name) {
            entry.stock += quantity;
        }
        Ok(())
    }

    fn registration_exists(&self, registration: &str) -> Result<bool, CatalogError> {
        Ok(self.inner.lock().unwrap().registry.contains(registration))
    }

    fn record_invoice(&self, invoice_id: &str, total: f64) -> Result<(), CatalogError> {
        self.inner
            .lock()
            .unwrap()
            .invoices
            .push((invoice_id.to_string(), total));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, stock: u32) -> CatalogEntry {
        CatalogEntry {
            name: name.into(),
            price: 1.0,
            tax_percent: 0.0,
            stock,
        }
    }

    #[test]
    fn preserves_catalog_order() {
        let catalog =
            InMemoryCatalog::with_medicines(vec![entry("zinc", 1), entry("aspirin", 1)]);
        assert_eq!(
            catalog.medicine_names().unwrap(),
            vec!["zinc".to_string(), "aspirin".to_string()]
        );
    }

    #[test]
    fn conditional_decrement_refuses_overdraw() {
        let catalog = InMemoryCatalog::with_medicines(vec![entry("aspirin", 3)]);
        assert!(catalog.decrement_stock("aspirin", 3).unwrap());
        assert!(!catalog.decrement_stock("aspirin", 1).unwrap());
        assert_eq!(
            catalog.find_medicine("aspirin").unwrap().unwrap().stock,
            0
        );
    }

    #[test]
    fn registry_defaults_empty() {
        let catalog = InMemoryCatalog::new();
        assert!(!catalog.registration_exists("MH-12345").unwrap());
        catalog.add_registration("MH-12345");
        assert!(catalog.registration_exists("MH-12345").unwrap());
    }
}
