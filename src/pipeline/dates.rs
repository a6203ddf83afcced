//! Prescription date validity.
//!
//! Valid iff the extracted token parses as `MM/DD/YYYY` and is not
//! strictly after the local current date. Missing or unparseable dates are
//! invalid, not errors. Comparison uses local wall-clock "now"; no
//! timezone normalization.

use chrono::{Local, NaiveDate};

pub fn date_is_valid(date: Option<&str>) -> bool {
    let Some(raw) = date else {
        return false;
    };
    match NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        Ok(parsed) => parsed <= Local::now().date_naive(),
        Err(_) => {
            tracing::debug!(raw, "Unparseable prescription date");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn past_date_is_valid() {
        assert!(date_is_valid(Some("01/01/2024")));
    }

    #[test]
    fn today_is_valid() {
        let today = Local::now().date_naive().format("%m/%d/%Y").to_string();
        assert!(date_is_valid(Some(&today)));
    }

    #[test]
    fn future_date_is_invalid() {
        assert!(!date_is_valid(Some("01/01/2099")));
    }

    #[test]
    fn missing_date_fails_closed() {
        assert!(!date_is_valid(None));
    }

    #[test]
    fn unparseable_date_fails_closed() {
        // month 13 and a day-first token both fail the MM/DD/YYYY parse
        assert!(!date_is_valid(Some("13/01/2024")));
        assert!(!date_is_valid(Some("31/12/2024")));
        assert!(!date_is_valid(Some("garbage")));
    }
}
