//! Final authorization verdict.
//!
//! A pure function of the three validator outputs, with fixed precedence:
//! doctor, then date, then medicines. The precedence determines which
//! single reason is surfaced when several validations fail at once.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    RejectedDoctor,
    RejectedDate,
    RejectedMedicines,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved)
    }

    /// Human-readable verdict line.
    pub fn reason(&self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::RejectedDoctor => "REJECTED - Invalid Doctor",
            Decision::RejectedDate => "REJECTED - Invalid Date",
            Decision::RejectedMedicines => "REJECTED - Unmatched Medicines",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Combine the validator outputs into one verdict.
pub fn decide(doctor_valid: bool, date_valid: bool, unmatched: &[String]) -> Decision {
    if !doctor_valid {
        return Decision::RejectedDoctor;
    }
    if !date_valid {
        return Decision::RejectedDate;
    }
    if !unmatched.is_empty() {
        return Decision::RejectedMedicines;
    }
    Decision::Approved
}
