use serde::{Deserialize, Serialize};

use super::decision::Decision;
use super::AnalysisError;

/// Raw OCR contract (external collaborator): image bytes in, best-effort
/// text out. Implementations may be remote vision models or mocks; the
/// pipeline only depends on this trait.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, AnalysisError>;
}

/// One medicine line pulled from the prescription text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMedicine {
    pub name: String,
    pub dosage: String,
}

/// Structured claims extracted from normalized prescription text.
/// Produced once per pipeline run; immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub registration_number: Option<String>,
    pub date: Option<String>,
    pub medicines: Vec<ExtractedMedicine>,
}

/// Outcome of matching one extracted name against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// The name as it appeared on the prescription.
    pub extracted: String,
    /// Canonical catalog name, when the best ratio strictly exceeds 80.
    pub matched: Option<String>,
    /// Best similarity ratio seen across the catalog (0–100).
    pub best_ratio: f64,
}

/// Full authorization verdict for one prescription image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub doctor_valid: bool,
    pub date_valid: bool,
    pub matched_medicines: Vec<String>,
    pub unmatched_medicines: Vec<String>,
    pub decision: Decision,
    pub registration_number: Option<String>,
    pub extracted_medicines: Vec<ExtractedMedicine>,
}

/// Wire payload for the analysis entry point.
///
/// Rejections are successes carrying a REJECTED_* decision; only input and
/// infrastructure failures surface as the error arm.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisResponse {
    Success(AnalysisReport),
    Error { message: String },
}

impl From<Result<AnalysisReport, AnalysisError>> for AnalysisResponse {
    fn from(result: Result<AnalysisReport, AnalysisError>) -> Self {
        match result {
            Ok(report) => AnalysisResponse::Success(report),
            Err(e) => AnalysisResponse::Error {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_tags_with_status_field() {
        let err: AnalysisResponse = Err::<AnalysisReport, _>(AnalysisError::Ocr(
            "engine offline".into(),
        ))
        .into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().contains("engine offline"));
    }

    #[test]
    fn success_response_flattens_report() {
        let report = AnalysisReport {
            doctor_valid: true,
            date_valid: true,
            matched_medicines: vec!["Paracetamol".into()],
            unmatched_medicines: vec![],
            decision: Decision::Approved,
            registration_number: Some("MH-12345".into()),
            extracted_medicines: vec![ExtractedMedicine {
                name: "paracetamol".into(),
                dosage: "500 mg".into(),
            }],
        };
        let json = serde_json::to_value(AnalysisResponse::Success(report)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["decision"], "APPROVED");
        assert_eq!(json["registration_number"], "MH-12345");
        assert_eq!(json["matched_medicines"][0], "Paracetamol");
    }
}
