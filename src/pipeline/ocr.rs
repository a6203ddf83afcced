//! OCR engines.
//!
//! The pipeline consumes OCR through the `OcrEngine` trait; this module
//! ships a vision-model HTTP engine (Ollama-compatible `/api/generate`)
//! and a mock for tests. No retries: an OCR transport failure is terminal
//! for the request and surfaces as an error payload.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::types::OcrEngine;
use super::AnalysisError;
use crate::config;

const OCR_SYSTEM_PROMPT: &str = "\
You are a prescription text extractor. Extract ALL visible text from the \
provided prescription image, one line of the prescription per output line. \
Preserve registration numbers, dates, and medicine dosage lines exactly as \
written. Output plain text only.";

const OCR_USER_PROMPT: &str = "Extract all visible text from this prescription image.";

/// Vision OCR engine backed by an Ollama-compatible HTTP endpoint.
pub struct VisionOcr {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl VisionOcr {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        }
    }

    /// Engine configured from the environment (RXGATE_OCR_* overrides).
    pub fn from_config() -> Self {
        Self::new(
            &config::ocr_base_url(),
            &config::ocr_model(),
            config::ocr_timeout_secs(),
        )
    }
}

/// Request body for /api/generate with an attached image.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    images: Vec<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OcrEngine for VisionOcr {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, AnalysisError> {
        let url = format!("{}/api/generate", self.base_url);
        let encoded = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        let body = GenerateRequest {
            model: &self.model,
            prompt: OCR_USER_PROMPT,
            system: OCR_SYSTEM_PROMPT,
            stream: false,
            images: vec![encoded],
        };

        tracing::debug!(model = %self.model, bytes = image_bytes.len(), "OCR request");

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                AnalysisError::OcrConnection(self.base_url.clone())
            } else {
                AnalysisError::Ocr(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Ocr(format!("HTTP {status}: {body}")));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AnalysisError::Ocr(format!("Malformed OCR response: {e}")))?;
        Ok(parsed.response)
    }
}

/// Fixed-text OCR engine for tests.
pub struct MockOcrEngine {
    pub text: String,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, AnalysisError> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_engine_echoes_text() {
        let engine = MockOcrEngine::new("paracetamol 500 mg");
        assert_eq!(engine.recognize(&[0u8; 4]).unwrap(), "paracetamol 500 mg");
    }

    #[test]
    fn vision_engine_normalizes_base_url() {
        let engine = VisionOcr::new("http://localhost:11434/", "deepseek-ocr", 30);
        assert_eq!(engine.base_url, "http://localhost:11434");
    }
}
