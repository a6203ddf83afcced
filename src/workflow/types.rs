use serde::{Deserialize, Serialize};

use super::state::WorkflowState;
use crate::pipeline::types::AnalysisResponse;

/// A requested purchase line. Read-only within the workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub in_stock: bool,
}

impl CartItem {
    /// Item names are normalized to lowercase at the cart boundary so they
    /// line up with catalog keys.
    pub fn new(name: &str, quantity: u32) -> Self {
        Self {
            name: name.to_lowercase(),
            quantity,
            in_stock: false,
        }
    }
}

/// Availability-annotated cart, as returned by a stock checker.
#[derive(Debug, Clone, Serialize)]
pub struct StockReport {
    pub all_available: bool,
    pub items: Vec<CartItem>,
}

/// One billed line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Generated bill. Created once, during bill generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub date: String,
    pub items: Vec<InvoiceLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Outcome of a workflow step or run, returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub state: WorkflowState,
    pub message: String,
    pub validation_result: Option<AnalysisResponse>,
    pub invoice: Option<Invoice>,
}

impl WorkflowResult {
    pub fn new(state: WorkflowState, message: &str) -> Self {
        Self {
            state,
            message: message.to_string(),
            validation_result: None,
            invoice: None,
        }
    }

    pub fn with_validation(mut self, validation: AnalysisResponse) -> Self {
        self.validation_result = Some(validation);
        self
    }

    pub fn with_invoice(mut self, invoice: Invoice) -> Self {
        self.invoice = Some(invoice);
        self
    }
}
