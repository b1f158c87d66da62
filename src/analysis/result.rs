//! Comparison result types

use serde::{Deserialize, Serialize};

use super::metadata::ComparisonMetadata;
use crate::similarity::SimilarityScores;

/// Complete result of comparing two recordings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Overall similarity (currently identical to `swara_similarity`)
    pub overall_similarity: f32,

    /// Note-label pattern similarity
    pub pattern_similarity: f32,

    /// Swara similarity: pitch proximity blended with note distribution agreement
    pub swara_similarity: f32,

    /// File name of the rendered comparison chart
    ///
    /// `None` if no chart was requested or rendering failed; the failure is
    /// listed in `metadata.warnings` and does not affect the scores.
    pub visualization_file: Option<String>,

    /// Per-comparison diagnostics
    pub metadata: ComparisonMetadata,
}

impl SimilarityResult {
    /// Assemble a result from computed scores
    pub fn from_scores(
        scores: SimilarityScores,
        visualization_file: Option<String>,
        metadata: ComparisonMetadata,
    ) -> Self {
        Self {
            overall_similarity: scores.overall,
            pattern_similarity: scores.pattern,
            swara_similarity: scores.swara,
            visualization_file,
            metadata,
        }
    }

    /// The three scores without the artifact and metadata
    pub fn scores(&self) -> SimilarityScores {
        SimilarityScores {
            overall: self.overall_similarity,
            pattern: self.pattern_similarity,
            swara: self.swara_similarity,
        }
    }

    /// Scores as percentages rounded to two decimals: (overall, pattern, swara)
    pub fn percentages(&self) -> (f64, f64, f64) {
        (
            to_percentage(self.overall_similarity),
            to_percentage(self.pattern_similarity),
            to_percentage(self.swara_similarity),
        )
    }
}

/// Convert a score in [0, 1] to a percentage rounded to two decimals
pub fn to_percentage(score: f32) -> f64 {
    (score as f64 * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_percentage() {
        assert_eq!(to_percentage(1.0), 100.0);
        assert_eq!(to_percentage(0.875), 87.5);
        assert_eq!(to_percentage(1.0 / 3.0), 33.33);
        assert_eq!(to_percentage(0.0), 0.0);
    }

    #[test]
    fn test_scores_round_trip_through_result() {
        let scores = SimilarityScores {
            overall: 0.8,
            pattern: 0.6,
            swara: 0.8,
        };
        let result = SimilarityResult::from_scores(scores, None, ComparisonMetadata::default());
        assert_eq!(result.scores(), scores);
        assert_eq!(result.percentages(), (80.0, 60.0, 80.0));
    }
}
