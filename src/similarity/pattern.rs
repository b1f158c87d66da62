//! Pattern similarity
//!
//! Compares how often each full note label (octave included) occurs in two
//! note sequences, as the cosine similarity of the two count vectors over the
//! sorted union of observed labels. Order within a sequence does not matter.

use std::collections::BTreeMap;

use crate::features::notes::NoteLabel;

/// Value returned when both sequences are empty
pub const EMPTY_PATTERN_SIMILARITY: f32 = 1.0;

/// Cosine similarity of two equal-length vectors (`1 - cosine distance`)
///
/// Returns `None` when the lengths differ, the vectors are empty or either
/// vector has zero norm, where the cosine distance is undefined.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += x as f64 * y as f64;
        norm_a += x as f64 * x as f64;
        norm_b += y as f64 * y as f64;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom > 0.0 {
        Some((dot / denom) as f32)
    } else {
        None
    }
}

/// Per-label occurrence counts of both sequences over their sorted label union
pub fn count_vectors(pattern1: &[NoteLabel], pattern2: &[NoteLabel]) -> (Vec<f32>, Vec<f32>) {
    let mut counts: BTreeMap<NoteLabel, (f32, f32)> = BTreeMap::new();
    for note in pattern1 {
        counts.entry(*note).or_insert((0.0, 0.0)).0 += 1.0;
    }
    for note in pattern2 {
        counts.entry(*note).or_insert((0.0, 0.0)).1 += 1.0;
    }

    counts.values().map(|&(a, b)| (a, b)).unzip()
}

/// Pattern similarity of two note sequences
///
/// `1 - cosine_distance(counts1, counts2)`. Symmetric; 1.0 for a non-empty
/// sequence compared with itself.
///
/// Degenerate inputs are defined rather than failing:
/// - both sequences empty: [`EMPTY_PATTERN_SIMILARITY`] (1.0)
/// - exactly one empty: 0.0
///
/// # Example
///
/// ```
/// use swara_similarity::similarity::pattern::pattern_similarity;
/// use swara_similarity::features::notes::NoteLabel;
///
/// let a: Vec<NoteLabel> = ["C4", "D4", "E4"].iter().map(|s| s.parse().unwrap()).collect();
/// let b: Vec<NoteLabel> = ["F4", "G4"].iter().map(|s| s.parse().unwrap()).collect();
/// assert!((pattern_similarity(&a, &a) - 1.0).abs() < 1e-6);
/// assert_eq!(pattern_similarity(&a, &b), 0.0);
/// ```
pub fn pattern_similarity(pattern1: &[NoteLabel], pattern2: &[NoteLabel]) -> f32 {
    if pattern1.is_empty() && pattern2.is_empty() {
        log::debug!("Pattern similarity: both note sequences empty");
        return EMPTY_PATTERN_SIMILARITY;
    }

    let (vector1, vector2) = count_vectors(pattern1, pattern2);
    cosine_similarity(&vector1, &vector2).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<NoteLabel> {
        names.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_identical_sequence_is_one() {
        let a = labels(&["C4", "C4", "D#4", "G3", "A4", "A4", "A4"]);
        assert!((pattern_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = labels(&["C4", "C4", "D4", "E4", "G4"]);
        let b = labels(&["C4", "E4", "E4", "A4"]);
        assert_eq!(pattern_similarity(&a, &b), pattern_similarity(&b, &a));
    }

    #[test]
    fn test_disjoint_is_zero() {
        let a = labels(&["C4", "D4"]);
        let b = labels(&["C5", "D5"]);
        assert_eq!(pattern_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = labels(&["C4", "D4", "E4", "C4"]);
        let b = labels(&["E4", "C4", "C4", "D4"]);
        assert!((pattern_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_known_value() {
        // Union [C4, D4]: counts (2, 0) vs (1, 1) -> 2 / (2 * sqrt 2)
        let a = labels(&["C4", "C4"]);
        let b = labels(&["C4", "D4"]);
        let expected = 1.0 / 2.0f32.sqrt();
        assert!((pattern_similarity(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_empty_inputs_are_defined() {
        let a = labels(&["C4"]);
        assert_eq!(pattern_similarity(&[], &[]), EMPTY_PATTERN_SIMILARITY);
        assert_eq!(pattern_similarity(&a, &[]), 0.0);
        assert_eq!(pattern_similarity(&[], &a), 0.0);
    }

    #[test]
    fn test_cosine_similarity_undefined_cases() {
        assert_eq!(cosine_similarity(&[], &[]), None);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), None);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), None);
    }
}
