//! Prescription-authorization pipeline.
//!
//! Data flows strictly downward:
//! image → raw text → normalized text → extracted fields →
//! {doctor validity, date validity, medicine matches} → decision.
//!
//! Soft validation failures (invalid doctor, stale date, unmatched
//! medicines) are decision outcomes, not errors; `AnalysisError` is
//! reserved for conditions that make the whole request meaningless
//! (missing image, OCR transport failure, unreadable catalog).

pub mod analyzer;
pub mod dates;
pub mod decision;
pub mod fields;
pub mod matcher;
pub mod ocr;
pub mod registry;
pub mod sanitize;
pub mod types;

pub use analyzer::PrescriptionAnalyzer;
pub use decision::Decision;
pub use types::{AnalysisReport, AnalysisResponse, ExtractedFields, ExtractedMedicine};

use std::path::PathBuf;

use thiserror::Error;

use crate::db::CatalogError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("Failed to read image: {0}")]
    ImageRead(#[from] std::io::Error),

    #[error("OCR engine unreachable at {0}")]
    OcrConnection(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
