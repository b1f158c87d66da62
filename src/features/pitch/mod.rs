//! Pitch contour extraction
//!
//! Turns a recording into a [`PitchFeatures`] set:
//! 1. Decode to mono and resample to the configured rate
//! 2. Centered STFT (frame 2048, hop 512 by default)
//! 3. Per-frame strongest interpolated peak between C2 and C7
//! 4. Keep frames whose peak magnitude exceeds the confidence threshold
//! 5. Label every retained positive frequency with its note
//!
//! # Example
//!
//! ```no_run
//! use swara_similarity::{AnalysisConfig, PitchExtractor};
//!
//! let extractor = PitchExtractor::new(AnalysisConfig::default())?;
//! let features = extractor.extract_pitch_features("varnam.wav")?;
//! println!("{} pitched frames, {} notes", features.len(), features.note_sequence.len());
//! # Ok::<(), swara_similarity::AnalysisError>(())
//! ```

pub mod piptrack;
pub mod stft;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::notes::{note_of_with_reference, NoteLabel};
use crate::io::decoder::decode_audio;
use crate::preprocessing::resample::resample;

use piptrack::PeakTracker;
use stft::compute_stft;

/// Pitch features of one recording
///
/// `pitch_sequence` and `confidence_sequence` are frame-aligned and of equal
/// length. `note_sequence` holds one label per positive frequency and can be
/// shorter. Retained-frame counts differ between recordings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchFeatures {
    /// Frequency in Hz of every retained frame, in time order
    pub pitch_sequence: Vec<f32>,

    /// Detection magnitude of every retained frame
    pub confidence_sequence: Vec<f32>,

    /// Note label of every retained frame with a positive frequency
    pub note_sequence: Vec<NoteLabel>,
}

impl PitchFeatures {
    /// Number of retained frames
    pub fn len(&self) -> usize {
        self.pitch_sequence.len()
    }

    /// True if no frame passed the confidence threshold
    pub fn is_empty(&self) -> bool {
        self.pitch_sequence.is_empty()
    }
}

/// Extracts [`PitchFeatures`] from audio files or in-memory samples
///
/// Holds only immutable configuration, so one extractor per worker thread is
/// all a parallel caller needs.
#[derive(Debug, Clone)]
pub struct PitchExtractor {
    config: AnalysisConfig,
    tracker: PeakTracker,
}

impl PitchExtractor {
    /// Create an extractor, validating the configuration
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let tracker = PeakTracker {
            min_frequency: config.min_frequency,
            max_frequency: config.max_frequency,
            peak_threshold: config.peak_threshold,
        };
        Ok(Self { config, tracker })
    }

    /// The configuration this extractor runs with
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Decode an audio file and extract its pitch features
    ///
    /// # Errors
    ///
    /// Decode failures are returned as `AnalysisError::DecodingError`; they are
    /// never reported as a recording without pitch.
    pub fn extract_pitch_features<P: AsRef<Path>>(
        &self,
        audio_path: P,
    ) -> Result<PitchFeatures, AnalysisError> {
        let audio = decode_audio(audio_path.as_ref())?;
        self.extract_from_samples(&audio.samples, audio.sample_rate)
    }

    /// Extract pitch features from mono samples at any sample rate
    pub fn extract_from_samples(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<PitchFeatures, AnalysisError> {
        let resampled = resample(samples, sample_rate, self.config.sample_rate)?;

        let spectrogram = compute_stft(
            &resampled,
            self.config.sample_rate,
            self.config.frame_size,
            self.config.hop_size,
        )?;

        let frames = self.tracker.track(&spectrogram);

        let mut features = PitchFeatures::default();
        for frame in &frames {
            if frame.magnitude > self.config.confidence_threshold {
                features.pitch_sequence.push(frame.frequency);
                features.confidence_sequence.push(frame.magnitude);
            }
        }

        features.note_sequence = features
            .pitch_sequence
            .iter()
            .filter_map(|&hz| note_of_with_reference(hz, self.config.reference_frequency))
            .collect();

        log::debug!(
            "Pitch extraction: {} of {} frames retained, {} notes",
            features.len(),
            frames.len(),
            features.note_sequence.len()
        );

        Ok(features)
    }
}
