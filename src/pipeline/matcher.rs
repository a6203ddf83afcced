//! Fuzzy matching of extracted medicine names against the catalog.
//!
//! Each extracted name is scored against every canonical name with a
//! normalized indel similarity ratio (0–100, case-insensitive); the best
//! ratio wins, and the item is matched only when that ratio strictly
//! exceeds 80. Ties keep the first catalog entry in iteration order, which
//! must stay deterministic. Matching is linear over the catalog per item;
//! fine at pharmacy-catalog sizes, callers needing scale should pre-index
//! by a phonetic or blocking key.

use super::types::{ExtractedMedicine, MatchResult};

const MATCH_THRESHOLD: f64 = 80.0;

/// Insertion/deletion edit distance (no substitutions), char-wise.
fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, &a_ch) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &b_ch) in b.iter().enumerate() {
            curr[j + 1] = if a_ch == b_ch {
                prev[j]
            } else {
                (prev[j + 1] + 1).min(curr[j] + 1)
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity ratio on a 0–100 scale, case-insensitive.
/// 100 means equal (two empty strings included), 0 means nothing shared.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100.0;
    }
    let dist = indel_distance(&a, &b);
    100.0 * (1.0 - dist as f64 / total as f64)
}

/// Match every extracted medicine against the catalog names.
/// One `MatchResult` per extracted item, in input order.
pub fn match_medicines(extracted: &[ExtractedMedicine], catalog: &[String]) -> Vec<MatchResult> {
    extracted
        .iter()
        .map(|medicine| {
            let mut best: Option<&str> = None;
            let mut best_ratio = 0.0_f64;
            for name in catalog {
                let ratio = similarity_ratio(&medicine.name, name);
                // strict: on a tie the earlier catalog entry stands
                if ratio > best_ratio {
                    best_ratio = ratio;
                    best = Some(name);
                }
            }

            let matched = if best_ratio > MATCH_THRESHOLD {
                best.map(str::to_string)
            } else {
                None
            };
            if matched.is_none() {
                tracing::info!(
                    name = %medicine.name,
                    best_ratio,
                    "No catalog match above threshold"
                );
            }

            MatchResult {
                extracted: medicine.name.clone(),
                matched,
                best_ratio,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str) -> ExtractedMedicine {
        ExtractedMedicine {
            name: name.into(),
            dosage: "500 mg".into(),
        }
    }

    fn catalog(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn ratio_identical_is_100() {
        assert_eq!(similarity_ratio("paracetamol", "Paracetamol"), 100.0);
        assert_eq!(similarity_ratio("", ""), 100.0);
    }

    #[test]
    fn ratio_known_values() {
        // kitten/sitting share "ittn": indel 5 over 13 chars
        let r = similarity_ratio("kitten", "sitting");
        assert!((r - 61.538).abs() < 0.01);
        assert_eq!(similarity_ratio("abc", ""), 0.0);
    }

    #[test]
    fn exact_case_insensitive_match() {
        let results = match_medicines(&[med("paracetamol")], &catalog(&["Paracetamol"]));
        assert_eq!(results[0].matched.as_deref(), Some("Paracetamol"));
    }

    #[test]
    fn near_match_above_threshold() {
        // paracetamol vs paracetamoll: indel 1 over 23 chars, ratio ~95.6
        let results = match_medicines(&[med("paracetamoll")], &catalog(&["Paracetamol"]));
        assert_eq!(results[0].matched.as_deref(), Some("Paracetamol"));
    }

    #[test]
    fn threshold_is_strict() {
        // "abcd" vs "abcdef": indel 2 over 10 chars, ratio exactly 80, not matched
        let results = match_medicines(&[med("abcd")], &catalog(&["abcdef"]));
        assert!((results[0].best_ratio - 80.0).abs() < 1e-9);
        assert!(results[0].matched.is_none());
    }

    #[test]
    fn unmatched_reports_extracted_name() {
        let results = match_medicines(
            &[med("xyzzy123")],
            &catalog(&["Paracetamol", "Morphine"]),
        );
        assert!(results[0].matched.is_none());
        assert_eq!(results[0].extracted, "xyzzy123");
    }

    #[test]
    fn tie_keeps_first_catalog_entry() {
        // equidistant from both entries; first in catalog order must win
        let results = match_medicines(&[med("abcdex")], &catalog(&["abcdef", "abcdeg"]));
        assert_eq!(results[0].matched.as_deref(), Some("abcdef"));

        let reversed = match_medicines(&[med("abcdex")], &catalog(&["abcdeg", "abcdef"]));
        assert_eq!(reversed[0].matched.as_deref(), Some("abcdeg"));
    }

    #[test]
    fn empty_catalog_matches_nothing() {
        let results = match_medicines(&[med("paracetamol")], &[]);
        assert!(results[0].matched.is_none());
        assert_eq!(results[0].best_ratio, 0.0);
    }

    #[test]
    fn one_result_per_extracted_item() {
        let results = match_medicines(
            &[med("paracetamol"), med("xyzzy123")],
            &catalog(&["Paracetamol"]),
        );
        assert_eq!(results.len(), 2);
        assert!(results[0].matched.is_some());
        assert!(results[1].matched.is_none());
    }
}
