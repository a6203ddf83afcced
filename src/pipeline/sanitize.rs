//! Normalize raw OCR text before field extraction.
//!
//! OCR of scans produces non-ASCII artifacts and ragged whitespace. The
//! normalizer reduces each line to printable ASCII with single spaces and
//! drops blank lines. Line structure is preserved: medicine extraction is
//! line-oriented, and collapsing newlines would merge unrelated lines into
//! cross-line false positives.

/// Normalize OCR output: non-ASCII becomes a space, non-printable ASCII is
/// dropped, whitespace runs collapse to single spaces, lines are trimmed,
/// blank lines removed. Empty input yields an empty string.
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let ascii: String = line
                .chars()
                .map(|c| if c.is_ascii() { c } else { ' ' })
                .filter(|c| !c.is_ascii_control() || *c == '\t')
                .collect();
            ascii.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_non_ascii_artifacts() {
        let raw = "Dr. Müller — paracetamol 500 mg";
        let clean = normalize_text(raw);
        assert!(clean.is_ascii());
        assert!(clean.contains("paracetamol 500 mg"));
    }

    #[test]
    fn strips_control_characters() {
        let raw = "Reg: MH-12345\x01\x02\nDate: 01/01/2024";
        let clean = normalize_text(raw);
        assert!(!clean.contains('\x01'));
        assert!(clean.contains("MH-12345"));
        assert!(clean.contains("01/01/2024"));
    }

    #[test]
    fn collapses_whitespace_runs() {
        let raw = "morphine    130\tmg";
        assert_eq!(normalize_text(raw), "morphine 130 mg");
    }

    #[test]
    fn preserves_line_structure() {
        let raw = "paracetamol 500 mg\n\n\nmorphine 130 mg";
        assert_eq!(normalize_text(raw), "paracetamol 500 mg\nmorphine 130 mg");
    }

    #[test]
    fn trims_each_line() {
        let raw = "  leading  \n  trailing  ";
        assert_eq!(normalize_text(raw), "leading\ntrailing");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn only_noise_returns_empty() {
        assert_eq!(normalize_text("\x00\x01\u{2014}\u{00e9}"), "");
    }
}
