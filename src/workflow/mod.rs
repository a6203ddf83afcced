//! Order fulfillment workflow.
//!
//! The state machine (`state`) is a vocabulary guard: it validates that a
//! state label belongs to the enumerated set and holds the current value.
//! Legality of the *order* of transitions is the orchestrator's job
//! (`orchestrator`), which sequences stock check → prescription
//! validation → bill generation → awaiting confirmation. Keeping the two
//! concerns separate lets tests target each independently.

pub mod billing;
pub mod orchestrator;
pub mod state;
pub mod stock;
pub mod traits;
pub mod types;

pub use orchestrator::OrderWorkflow;
pub use state::{StateMachine, WorkflowState};
pub use types::{CartItem, Invoice, WorkflowResult};

use thiserror::Error;

use crate::db::CatalogError;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Invalid state transition: {0}")]
    UnknownState(String),

    #[error("Order is not awaiting confirmation (state: {0})")]
    NotAwaitingConfirmation(state::WorkflowState),

    #[error("Unknown catalog item: {0}")]
    UnknownItem(String),

    #[error("Insufficient stock for {name} (requested {requested})")]
    InsufficientStock { name: String, requested: u32 },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
