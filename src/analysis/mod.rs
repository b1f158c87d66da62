//! Comparison orchestration and result aggregation
//!
//! - Feature cache (each file is extracted once per [`Comparator`])
//! - Result types and metadata
//! - Flat comparison log
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use swara_similarity::{AnalysisConfig, Comparator};
//!
//! let mut comparator = Comparator::new(AnalysisConfig::default())?;
//! let result = comparator.analyze_similarity(
//!     Path::new("kalyani_a.wav"),
//!     Path::new("kalyani_b.mp3"),
//!     Some(Path::new("comparison_plot.svg")),
//! )?;
//! println!("Overall: {:.1}%", result.overall_similarity * 100.0);
//! # Ok::<(), swara_similarity::AnalysisError>(())
//! ```

pub mod cache;
pub mod log;
pub mod metadata;
pub mod result;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::pitch::{PitchExtractor, PitchFeatures};
use crate::similarity::compare_features;
use crate::visualization::renderer::{display_name, render_comparison, ComparisonChart};

use cache::FeatureCache;
use metadata::ComparisonMetadata;
use result::SimilarityResult;

/// Compares recordings, reusing extracted features across calls
#[derive(Debug)]
pub struct Comparator {
    extractor: PitchExtractor,
    cache: FeatureCache,
}

impl Comparator {
    /// Create a comparator
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the configuration is invalid.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        Ok(Self {
            extractor: PitchExtractor::new(config)?,
            cache: FeatureCache::new(),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalysisConfig {
        self.extractor.config()
    }

    /// Feature cache (exposes hit/miss counts)
    pub fn cache(&self) -> &FeatureCache {
        &self.cache
    }

    /// Pitch features of a file, extracted at most once
    pub fn features(&mut self, path: &Path) -> Result<Arc<PitchFeatures>, AnalysisError> {
        self.cache.get_or_extract(&self.extractor, path)
    }

    /// Compare two recordings
    ///
    /// # Arguments
    ///
    /// * `file1` - First recording
    /// * `file2` - Second recording
    /// * `plot_path` - Where to write the comparison chart, if wanted
    ///
    /// # Returns
    ///
    /// The three scores, the chart file name if one was written, and metadata.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::DecodingError` if either file cannot be read or
    /// decoded. Chart rendering failures are not errors: they are logged,
    /// recorded in `metadata.warnings` and leave `visualization_file` empty.
    pub fn analyze_similarity(
        &mut self,
        file1: &Path,
        file2: &Path,
        plot_path: Option<&Path>,
    ) -> Result<SimilarityResult, AnalysisError> {
        let start = Instant::now();

        ::log::debug!("Comparing {} with {}", file1.display(), file2.display());

        let features1 = self.features(file1)?;
        let features2 = self.features(file2)?;
        let config = self.extractor.config();

        let mut metadata = ComparisonMetadata {
            frames_retained: (features1.len(), features2.len()),
            notes: (features1.note_sequence.len(), features2.note_sequence.len()),
            ..ComparisonMetadata::default()
        };

        for (path, features) in [(file1, &features1), (file2, &features2)] {
            if features.is_empty() {
                let warning = format!("No pitched frames detected in {}", display_name(path));
                ::log::warn!("{}", warning);
                metadata.warnings.push(warning);
            }
        }

        let scores = compare_features(&features1, &features2, config);

        let visualization_file = match plot_path {
            Some(path) => {
                let label1 = display_name(file1);
                let label2 = display_name(file2);
                let chart = ComparisonChart {
                    label1: &label1,
                    label2: &label2,
                    features1: &features1,
                    features2: &features2,
                    scores,
                    hop_seconds: config.hop_seconds(),
                };
                match render_comparison(&chart, path) {
                    Ok(()) => Some(display_name(path)),
                    Err(e) => {
                        ::log::warn!("Visualization failed: {}", e);
                        metadata.warnings.push(format!("Visualization failed: {}", e));
                        None
                    }
                }
            }
            None => None,
        };

        metadata.processing_time_ms = start.elapsed().as_secs_f32() * 1000.0;

        ::log::info!(
            "{} vs {}: overall {:.4}, pattern {:.4}, swara {:.4} ({:.1} ms)",
            display_name(file1),
            display_name(file2),
            scores.overall,
            scores.pattern,
            scores.swara,
            metadata.processing_time_ms
        );

        Ok(SimilarityResult::from_scores(
            scores,
            visualization_file,
            metadata,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            hop_size: 0,
            ..AnalysisConfig::default()
        };
        assert!(Comparator::new(config).is_err());
    }

    #[test]
    fn test_missing_file_is_decoding_error() {
        let mut comparator = Comparator::new(AnalysisConfig::default()).unwrap();
        let err = comparator
            .analyze_similarity(
                Path::new("/nonexistent/a.wav"),
                Path::new("/nonexistent/b.wav"),
                None,
            )
            .unwrap_err();
        assert!(err.is_decode_failure(), "got {}", err);
        assert!(comparator.cache().is_empty());
    }
}
