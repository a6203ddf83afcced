//! Pipeline orchestrator: OCR → normalize → extract → validate → match →
//! decide.
//!
//! Uses trait objects for the OCR engine and the catalog, enabling
//! dependency injection. The report is a pure function of the extracted
//! text and catalog contents, so identical input text always yields an
//! identical decision.

use std::path::Path;
use std::sync::Arc;

use super::dates::date_is_valid;
use super::decision::decide;
use super::fields::extract_fields;
use super::matcher::match_medicines;
use super::registry::validate_doctor;
use super::sanitize::normalize_text;
use super::types::{AnalysisReport, OcrEngine};
use super::AnalysisError;
use crate::db::CatalogRepository;

pub struct PrescriptionAnalyzer {
    ocr_engine: Box<dyn OcrEngine>,
    catalog: Arc<dyn CatalogRepository>,
}

impl PrescriptionAnalyzer {
    pub fn new(ocr_engine: Box<dyn OcrEngine>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            ocr_engine,
            catalog,
        }
    }

    /// Analyze a prescription image on disk.
    /// A missing or unreadable file is an input error, not a rejection.
    pub fn analyze_file(&self, image_path: &Path) -> Result<AnalysisReport, AnalysisError> {
        if !image_path.exists() {
            return Err(AnalysisError::ImageNotFound(image_path.to_path_buf()));
        }
        let image_bytes = std::fs::read(image_path)?;
        self.analyze_bytes(&image_bytes)
    }

    /// Analyze raw image bytes.
    pub fn analyze_bytes(&self, image_bytes: &[u8]) -> Result<AnalysisReport, AnalysisError> {
        let raw_text = self.ocr_engine.recognize(image_bytes)?;
        self.analyze_text(&raw_text)
    }

    /// Analyze already-extracted text. Deterministic for a fixed catalog.
    pub fn analyze_text(&self, raw_text: &str) -> Result<AnalysisReport, AnalysisError> {
        let text = normalize_text(raw_text);
        let fields = extract_fields(&text);
        tracing::info!(
            registration = ?fields.registration_number,
            date = ?fields.date,
            medicines = fields.medicines.len(),
            "Extracted prescription fields"
        );

        let doctor_valid = validate_doctor(&*self.catalog, fields.registration_number.as_deref())?;
        let date_valid = date_is_valid(fields.date.as_deref());

        let catalog_names = self.catalog.medicine_names()?;
        let matches = match_medicines(&fields.medicines, &catalog_names);
        let matched_medicines: Vec<String> =
            matches.iter().filter_map(|m| m.matched.clone()).collect();
        let unmatched_medicines: Vec<String> = matches
            .iter()
            .filter(|m| m.matched.is_none())
            .map(|m| m.extracted.clone())
            .collect();

        let decision = decide(doctor_valid, date_valid, &unmatched_medicines);
        tracing::info!(%decision, doctor_valid, date_valid, "Authorization decision");

        Ok(AnalysisReport {
            doctor_valid,
            date_valid,
            matched_medicines,
            unmatched_medicines,
            decision,
            registration_number: fields.registration_number,
            extracted_medicines: fields.medicines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CatalogEntry, InMemoryCatalog};
    use crate::pipeline::decision::Decision;
    use crate::pipeline::ocr::MockOcrEngine;

    fn catalog() -> Arc<InMemoryCatalog> {
        let catalog = InMemoryCatalog::new();
        for name in ["Paracetamol", "Morphine", "Aspirin"] {
            catalog.add_medicine(CatalogEntry {
                name: name.into(),
                price: 5.0,
                tax_percent: 5.0,
                stock: 100,
            });
        }
        catalog.add_registration("MH-12345");
        Arc::new(catalog)
    }

    fn analyzer(ocr_text: &str) -> PrescriptionAnalyzer {
        PrescriptionAnalyzer::new(Box::new(MockOcrEngine::new(ocr_text)), catalog())
    }

    const VALID_TEXT: &str =
        "Dr. A Sharma Reg: MH-12345\nDate: 01/01/2024\nparacetamol 500 mg";

    #[test]
    fn valid_prescription_is_approved() {
        let report = analyzer(VALID_TEXT).analyze_bytes(&[1, 2, 3]).unwrap();
        assert!(report.doctor_valid);
        assert!(report.date_valid);
        assert_eq!(report.decision, Decision::Approved);
        assert_eq!(report.matched_medicines, vec!["Paracetamol".to_string()]);
        assert!(report.unmatched_medicines.is_empty());
        assert_eq!(report.registration_number.as_deref(), Some("MH-12345"));
    }

    #[test]
    fn unknown_doctor_rejects_regardless_of_rest() {
        let text = "Reg: MH-99999\nDate: 01/01/2024\nparacetamol 500 mg";
        let report = analyzer(text).analyze_bytes(&[0]).unwrap();
        assert_eq!(report.decision, Decision::RejectedDoctor);
        // medicines still reported for caller inspection
        assert_eq!(report.matched_medicines, vec!["Paracetamol".to_string()]);
    }

    #[test]
    fn future_date_rejects() {
        let text = "Reg: MH-12345\nDate: 01/01/2099\nparacetamol 500 mg";
        let report = analyzer(text).analyze_bytes(&[0]).unwrap();
        assert_eq!(report.decision, Decision::RejectedDate);
    }

    #[test]
    fn unmatched_medicine_rejects_and_is_listed() {
        let text = "Reg: MH-12345\nDate: 01/01/2024\nxyzzy123 10 mg";
        let report = analyzer(text).analyze_bytes(&[0]).unwrap();
        assert_eq!(report.decision, Decision::RejectedMedicines);
        assert_eq!(report.unmatched_medicines, vec!["xyzzy123".to_string()]);
    }

    #[test]
    fn missing_image_is_an_input_error() {
        let result = analyzer(VALID_TEXT).analyze_file(Path::new("/nonexistent/rx.jpg"));
        assert!(matches!(result, Err(AnalysisError::ImageNotFound(_))));
    }

    #[test]
    fn analysis_is_idempotent_over_text() {
        let analyzer = analyzer(VALID_TEXT);
        let first = analyzer.analyze_text(VALID_TEXT).unwrap();
        let second = analyzer.analyze_text(VALID_TEXT).unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn ocr_noise_is_normalized_before_extraction() {
        let noisy = "Reg:\u{00a0}MH-12345\u{2014}\nDate:  01/01/2024\npara\u{00e7}etamol  500 mg";
        let report = analyzer(noisy).analyze_bytes(&[0]).unwrap();
        assert_eq!(report.registration_number.as_deref(), Some("MH-12345"));
        assert!(report.date_valid);
    }
}
