//! Pattern-rule field extraction from normalized prescription text.
//!
//! Three registration formats are recognized: state-board style
//! `XX-NNNNN` (two letters, hyphen, five digits), `DEA #: NNNNNNN` and
//! `NPI #: NNNNNNN` (seven digits). Dates are `NN/NN/NNNN` tokens taken
//! verbatim; validity is judged later. Medicines are scanned line by line,
//! anchored on a numeric dosage ending in `mg`, which filters prose tokens
//! out of noisy OCR output.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{ExtractedFields, ExtractedMedicine};

static REGISTRATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:[A-Z]{2}-\d{5}|DEA\s?#:\s?\d{7}|NPI\s?#:\s?\d{7})\b").unwrap()
});

static SEVEN_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{7}").unwrap());

static DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").unwrap());

static MEDICINE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-zA-Z0-9-]+)\s+(\d{1,4}(?:-\d{1,4})?)\s?mg\b").unwrap()
});

/// Extract a registration number, if any format matches.
/// DEA/NPI forms return only the digit sequence; the letter-prefixed form
/// returns the whole matched token verbatim.
pub fn extract_registration(text: &str) -> Option<String> {
    let matched = REGISTRATION.find(text)?.as_str();
    let upper = matched.to_uppercase();
    if upper.contains("DEA") || upper.contains("NPI") {
        SEVEN_DIGITS
            .find(matched)
            .map(|digits| digits.as_str().to_string())
    } else {
        Some(matched.to_string())
    }
}

/// First date-shaped token, verbatim.
pub fn extract_date(text: &str) -> Option<String> {
    DATE.find(text).map(|m| m.as_str().to_string())
}

/// Scan line by line; each line contributes at most one medicine, from the
/// first `<name> <digits>[-digits] mg` hit on that line.
pub fn extract_medicines(text: &str) -> Vec<ExtractedMedicine> {
    text.lines()
        .filter_map(|line| {
            MEDICINE_LINE.captures(line).map(|caps| ExtractedMedicine {
                name: caps[1].to_string(),
                dosage: format!("{} mg", &caps[2]),
            })
        })
        .collect()
}

/// Run all three extractors over normalized text.
pub fn extract_fields(text: &str) -> ExtractedFields {
    ExtractedFields {
        registration_number: extract_registration(text),
        date: extract_date(text),
        medicines: extract_medicines(text),
    }
}
