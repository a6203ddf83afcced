//! Collaborator contracts consumed by the orchestrator.
//!
//! Explicit traits with fixed signatures so substitutability is
//! type-checked; the orchestrator never calls a concrete collaborator
//! directly.

use std::path::Path;

use super::types::{CartItem, Invoice, StockReport};
use super::WorkflowError;
use crate::pipeline::types::AnalysisReport;
use crate::pipeline::{AnalysisError, PrescriptionAnalyzer};

/// Annotates/confirms availability for a cart.
pub trait StockChecker: Send + Sync {
    fn check(&self, items: &[CartItem]) -> Result<StockReport, WorkflowError>;
}

/// The full prescription-authorization pipeline, seen from the workflow.
pub trait PrescriptionScreener: Send + Sync {
    fn analyze(&self, image_path: &Path) -> Result<AnalysisReport, AnalysisError>;
}

impl PrescriptionScreener for PrescriptionAnalyzer {
    fn analyze(&self, image_path: &Path) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_file(image_path)
    }
}

/// Computes the bill for a cart and persists the stock decrement.
pub trait BillingProcessor: Send + Sync {
    fn bill(&self, items: &[CartItem]) -> Result<Invoice, WorkflowError>;
}
