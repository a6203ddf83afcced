//! Doctor registry validation.
//!
//! A plain membership test against the reference registry. Fails closed: a
//! prescription with no extractable registration number is never valid. A
//! registry that cannot be read is an infrastructure failure, raised as an
//! error rather than folded into a soft rejection.

use crate::db::{CatalogError, CatalogRepository};

pub fn validate_doctor(
    catalog: &dyn CatalogRepository,
    registration: Option<&str>,
) -> Result<bool, CatalogError> {
    let Some(registration) = registration else {
        tracing::debug!("No registration number extracted; doctor invalid");
        return Ok(false);
    };
    let valid = catalog.registration_exists(registration)?;
    if !valid {
        tracing::info!(registration, "Registration number not in registry");
    }
    Ok(valid)
}
