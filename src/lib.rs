//! # Swara Similarity
//!
//! Similarity scoring for Carnatic music recordings. Two audio files are
//! reduced to pitch contours and note sequences, then compared on three
//! scores, each in [0, 1]:
//!
//! - **Pattern similarity**: cosine similarity of note-label counts
//! - **Swara similarity**: how many detected pitches of one recording have a
//!   close match in the other (70%), blended with the agreement of the two
//!   pitch-class distributions (30%)
//! - **Overall similarity**: currently the swara score
//!
//! An optional SVG chart shows both distributions, both pitch contours and
//! the per-class agreement.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use swara_similarity::{compare_files, AnalysisConfig};
//!
//! let result = compare_files(
//!     Path::new("kalyani_a.wav"),
//!     Path::new("kalyani_b.mp3"),
//!     Some(Path::new("comparison_plot.svg")),
//!     AnalysisConfig::default(),
//! )?;
//!
//! println!("Overall: {:.2}%", result.overall_similarity * 100.0);
//! println!("Pattern: {:.2}%", result.pattern_similarity * 100.0);
//! println!("Swara:   {:.2}%", result.swara_similarity * 100.0);
//! # Ok::<(), swara_similarity::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Audio File → Decode + Downmix → Resample → STFT → Peak Tracking → Notes
//!            → Distribution → Similarity Scores → (Chart) → Result / Log Line
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;
pub mod similarity;
pub mod visualization;

use std::path::Path;

// Re-export main types
pub use analysis::log::{append_log_entry, format_log_line, read_log_entries, LogEntry};
pub use analysis::metadata::ComparisonMetadata;
pub use analysis::result::SimilarityResult;
pub use analysis::Comparator;
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::distribution::{analyze_note_distribution, NoteDistribution};
pub use features::notes::{NoteLabel, PitchClass};
pub use features::pitch::{PitchExtractor, PitchFeatures};
pub use similarity::{compare_features, SimilarityScores};

/// Compare two audio files
///
/// One-shot form of [`Comparator::analyze_similarity`]. Use a [`Comparator`]
/// directly to reuse extracted features across several comparisons.
///
/// # Arguments
///
/// * `file1` - First recording (WAV, MP3, M4A/AAC, ALAC)
/// * `file2` - Second recording
/// * `plot_path` - Where to write the SVG comparison chart, if wanted
/// * `config` - Analysis configuration parameters
///
/// # Returns
///
/// `SimilarityResult` with the overall, pattern and swara scores
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an invalid configuration and
/// `AnalysisError::DecodingError` if either file cannot be decoded. A decode
/// failure is never reported as a zero score.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use swara_similarity::{compare_files, AnalysisConfig};
///
/// let result = compare_files(Path::new("a.wav"), Path::new("a.wav"), None, AnalysisConfig::default())?;
/// assert!((result.overall_similarity - 1.0).abs() < 1e-6);
/// # Ok::<(), swara_similarity::AnalysisError>(())
/// ```
pub fn compare_files(
    file1: &Path,
    file2: &Path,
    plot_path: Option<&Path>,
    config: AnalysisConfig,
) -> Result<SimilarityResult, AnalysisError> {
    Comparator::new(config)?.analyze_similarity(file1, file2, plot_path)
}
