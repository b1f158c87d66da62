//! Similarity scoring between two recordings
//!
//! Three scores are computed from a pair of [`PitchFeatures`]:
//! - **Pattern**: cosine similarity of full note-label counts
//! - **Swara**: pitch proximity blended with pitch-class distribution agreement
//! - **Overall**: currently the swara score itself
//!
//! Scores are not clamped. With non-negative counts the pattern score stays in
//! [0, 1] up to rounding, and the swara score is a convex blend of two terms
//! in [0, 1].

pub mod pattern;
pub mod swara;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::features::pitch::PitchFeatures;

pub use pattern::pattern_similarity;
pub use swara::swara_similarity;

/// The three scores of one comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScores {
    /// Overall similarity (alias of the swara score)
    pub overall: f32,
    /// Note-label pattern similarity
    pub pattern: f32,
    /// Swara (pitch proximity + distribution) similarity
    pub swara: f32,
}

/// Overall similarity of two recordings
///
/// Defined as the swara similarity. Whether it should instead be a distinct
/// blend of pattern and swara is undecided; until then the two scores
/// are identical.
pub fn overall_similarity(
    features1: &PitchFeatures,
    features2: &PitchFeatures,
    config: &AnalysisConfig,
) -> f32 {
    swara_similarity(features1, features2, config)
}

/// Compute all three scores, with no I/O
pub fn compare_features(
    features1: &PitchFeatures,
    features2: &PitchFeatures,
    config: &AnalysisConfig,
) -> SimilarityScores {
    let swara = swara_similarity(features1, features2, config);
    let pattern = pattern_similarity(&features1.note_sequence, &features2.note_sequence);

    SimilarityScores {
        overall: swara,
        pattern,
        swara,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notes::note_of;

    fn features(pitches: &[f32]) -> PitchFeatures {
        PitchFeatures {
            pitch_sequence: pitches.to_vec(),
            confidence_sequence: vec![1.0; pitches.len()],
            note_sequence: pitches.iter().filter_map(|&p| note_of(p)).collect(),
        }
    }

    #[test]
    fn test_overall_aliases_swara() {
        let a = features(&[220.0, 230.0, 440.0, 500.0]);
        let b = features(&[221.0, 445.0, 880.0]);
        let config = AnalysisConfig::default();
        let scores = compare_features(&a, &b, &config);
        assert_eq!(scores.overall, scores.swara);
        assert_eq!(scores.overall, overall_similarity(&a, &b, &config));
    }

    #[test]
    fn test_identical_features_score_one() {
        let a = features(&[196.0, 220.0, 246.9, 261.6, 293.7]);
        let scores = compare_features(&a, &a, &AnalysisConfig::default());
        assert!((scores.pattern - 1.0).abs() < 1e-6);
        assert!((scores.swara - 1.0).abs() < 1e-6);
        assert!((scores.overall - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_silence_vs_tone_is_defined() {
        let silent = features(&[]);
        let tone = features(&[440.0; 20]);
        let scores = compare_features(&tone, &silent, &AnalysisConfig::default());
        assert_eq!(scores.pattern, 0.0);
        // proximity 0, distribution union {A}: 1 - |1 - 0| = 0
        assert!(scores.swara.abs() < 1e-6);
        assert!(scores.swara.is_finite());
    }

    #[test]
    fn test_both_silent_is_defined() {
        let silent = features(&[]);
        let scores = compare_features(&silent, &silent, &AnalysisConfig::default());
        assert_eq!(scores.pattern, pattern::EMPTY_PATTERN_SIMILARITY);
        assert!((scores.swara - 0.3).abs() < 1e-6);
    }
}
