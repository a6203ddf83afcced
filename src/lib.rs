//! RxGate — prescription authorization and order workflow engine.
//!
//! Two halves:
//! - `pipeline`: turns an untrusted scanned prescription into a validated
//!   APPROVED/REJECTED decision (OCR → normalize → extract → validate →
//!   match → decide).
//! - `workflow`: drives an order through stock check, prescription
//!   validation, and bill generation behind an explicit state machine,
//!   deferring final commitment to an external confirmation.
//!
//! The catalog and doctor registry live behind `db::CatalogRepository`;
//! everything else is injected through traits so collaborators stay
//! substitutable.

pub mod config;
pub mod db;
pub mod pipeline;
pub mod workflow;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from RUST_LOG, falling back to the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
