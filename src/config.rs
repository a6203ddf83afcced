use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "RxGate";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/RxGate/ on all platforms (user-visible, holds the catalog database)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("RxGate")
}

/// Get the default catalog database path
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("catalog.db")
}

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "info,rxgate=debug"
}

/// Base URL of the vision OCR service (Ollama-compatible).
/// Override with RXGATE_OCR_URL.
pub fn ocr_base_url() -> String {
    std::env::var("RXGATE_OCR_URL").unwrap_or_else(|_| "http://localhost:11434".to_string())
}

/// Vision model used for prescription OCR.
/// Override with RXGATE_OCR_MODEL.
pub fn ocr_model() -> String {
    std::env::var("RXGATE_OCR_MODEL").unwrap_or_else(|_| "deepseek-ocr".to_string())
}

/// OCR request timeout in seconds. Override with RXGATE_OCR_TIMEOUT_SECS.
pub fn ocr_timeout_secs() -> u64 {
    std::env::var("RXGATE_OCR_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(300)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("RxGate"));
    }

    #[test]
    fn db_path_under_app_data() {
        let db = default_db_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("catalog.db"));
    }

    #[test]
    fn ocr_timeout_has_sane_default() {
        assert!(ocr_timeout_secs() > 0);
    }
}
