//! Workflow orchestrator — the sequencer.
//!
//! Drives one order through stock check → prescription validation → bill
//! generation → awaiting confirmation, recording progress in the state
//! machine. No step runs unless its predecessor succeeded, so a bill can
//! never be generated for an order that failed stock or prescription
//! checks. Final commitment is deferred to an external `confirm` call.

use std::path::Path;

use super::state::{StateMachine, WorkflowState};
use super::traits::{BillingProcessor, PrescriptionScreener, StockChecker};
use super::types::{CartItem, WorkflowResult};
use super::WorkflowError;
use crate::pipeline::types::AnalysisResponse;

pub struct OrderWorkflow {
    machine: StateMachine,
    stock_checker: Box<dyn StockChecker>,
    screener: Box<dyn PrescriptionScreener>,
    billing: Box<dyn BillingProcessor>,
}

impl OrderWorkflow {
    pub fn new(
        stock_checker: Box<dyn StockChecker>,
        screener: Box<dyn PrescriptionScreener>,
        billing: Box<dyn BillingProcessor>,
    ) -> Self {
        Self {
            machine: StateMachine::new(),
            stock_checker,
            screener,
            billing,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.machine.current()
    }

    /// Run the order up to the confirmation gate.
    pub fn execute(&mut self, items: &[CartItem], image_path: &Path) -> WorkflowResult {
        // Step 1: stock
        let stock = match self.stock_checker.check(items) {
            Ok(report) => report,
            Err(e) => return self.fail(&format!("Stock check failed: {e}")),
        };
        if !stock.all_available {
            return self.fail("Stock unavailable.");
        }
        self.machine.transition(WorkflowState::StockChecked);

        // Step 2: prescription
        let report = match self.screener.analyze(image_path) {
            Ok(report) if report.decision.is_approved() => report,
            Ok(report) => {
                let result = self
                    .fail("Prescription validation failed.")
                    .with_validation(AnalysisResponse::Success(report));
                return result;
            }
            Err(e) => {
                let message = e.to_string();
                return self
                    .fail("Prescription validation failed.")
                    .with_validation(AnalysisResponse::Error { message });
            }
        };
        self.machine.transition(WorkflowState::PrescriptionValidated);
        let validation = AnalysisResponse::Success(report);

        // Step 3: bill
        let invoice = match self.billing.bill(&stock.items) {
            Ok(invoice) => invoice,
            Err(e) => {
                return self
                    .fail(&format!("Bill generation failed: {e}"))
                    .with_validation(validation);
            }
        };
        self.machine.transition(WorkflowState::BillGenerated);

        // Step 4: hand over to external confirmation
        self.machine.transition(WorkflowState::AwaitingConfirmation);
        WorkflowResult::new(WorkflowState::AwaitingConfirmation, "Awaiting confirmation.")
            .with_validation(validation)
            .with_invoice(invoice)
    }

    /// Resolve an order awaiting confirmation. Calling from any other
    /// state is a caller contract violation, rejected deterministically.
    pub fn confirm(&mut self, confirm: bool) -> Result<WorkflowResult, WorkflowError> {
        if self.machine.current() != WorkflowState::AwaitingConfirmation {
            return Err(WorkflowError::NotAwaitingConfirmation(
                self.machine.current(),
            ));
        }
        if confirm {
            self.machine.transition(WorkflowState::Completed);
            Ok(WorkflowResult::new(
                WorkflowState::Completed,
                "Order completed.",
            ))
        } else {
            self.machine.transition(WorkflowState::Failed);
            Ok(WorkflowResult::new(
                WorkflowState::Failed,
                "Order cancelled.",
            ))
        }
    }

    fn fail(&mut self, message: &str) -> WorkflowResult {
        tracing::warn!(message, "Workflow failed");
        self.machine.transition(WorkflowState::Failed);
        WorkflowResult::new(WorkflowState::Failed, message)
    }
}
