//! Configuration parameters for pitch extraction and similarity scoring

use crate::error::AnalysisError;
use crate::features::notes::midi_to_hz;

/// MIDI number of C2, the lowest pitch tracked by default
const C2_MIDI: f32 = 36.0;

/// MIDI number of C7, the highest pitch tracked by default
const C7_MIDI: f32 = 96.0;

/// Analysis configuration parameters
///
/// Held immutably by the extractor and the comparator. Two comparisons that
/// share a configuration share nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    // Decoding
    /// Sample rate every recording is resampled to before analysis (default: 22050)
    pub sample_rate: u32,

    // STFT parameters
    /// Frame size for STFT (default: 2048)
    pub frame_size: usize,

    /// Hop size for STFT (default: 512)
    pub hop_size: usize,

    // Pitch tracking
    /// Lowest candidate frequency in Hz (default: C2, ~65.41 Hz)
    pub min_frequency: f32,

    /// Highest candidate frequency in Hz, exclusive (default: C7, ~2093 Hz)
    pub max_frequency: f32,

    /// Peak picking threshold relative to the loudest bin of each frame (default: 0.1)
    pub peak_threshold: f32,

    /// Absolute magnitude a frame's best candidate must exceed to be kept (default: 0.1)
    pub confidence_threshold: f32,

    /// Reference frequency of A4 in Hz (default: 440.0)
    pub reference_frequency: f32,

    // Swara similarity
    /// Pitch matching tolerance, in semitones, converted once to a Hz window (default: 0.2)
    pub tolerance_semitones: f32,

    /// Weight of the pitch-proximity term (default: 0.7)
    pub pitch_weight: f32,

    /// Weight of the note-distribution term (default: 0.3)
    pub distribution_weight: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            frame_size: 2048,
            hop_size: 512,
            min_frequency: midi_to_hz(C2_MIDI),
            max_frequency: midi_to_hz(C7_MIDI),
            peak_threshold: 0.1,
            confidence_threshold: 0.1,
            reference_frequency: 440.0,
            tolerance_semitones: 0.2,
            pitch_weight: 0.7,
            distribution_weight: 0.3,
        }
    }
}

impl AnalysisConfig {
    /// Check that the parameters describe a usable analysis
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }

        if self.frame_size == 0 {
            return Err(AnalysisError::InvalidInput(
                "Frame size must be > 0".to_string(),
            ));
        }

        if self.hop_size == 0 {
            return Err(AnalysisError::InvalidInput(
                "Hop size must be > 0".to_string(),
            ));
        }

        if self.hop_size > self.frame_size {
            return Err(AnalysisError::InvalidInput(format!(
                "Hop size ({}) larger than frame size ({})",
                self.hop_size, self.frame_size
            )));
        }

        if self.min_frequency <= 0.0 || self.max_frequency <= self.min_frequency {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid frequency range: min={}, max={}",
                self.min_frequency, self.max_frequency
            )));
        }

        if self.reference_frequency <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Reference frequency must be > 0, got {}",
                self.reference_frequency
            )));
        }

        Ok(())
    }

    /// Absolute pitch matching window in Hz
    ///
    /// The tolerance is read as a MIDI number and converted with the
    /// MIDI-to-Hz relation, giving a fixed window of roughly 8.27 Hz for the
    /// default 0.2 semitones. It is not a relative tolerance.
    pub fn tolerance_hz(&self) -> f32 {
        midi_to_hz(self.tolerance_semitones)
    }

    /// Duration of one hop in seconds
    pub fn hop_seconds(&self) -> f32 {
        self.hop_size as f32 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_is_c2_to_c7() {
        let config = AnalysisConfig::default();
        assert!((config.min_frequency - 65.406).abs() < 0.01);
        assert!((config.max_frequency - 2093.0).abs() < 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tolerance_is_absolute_hz_window() {
        let config = AnalysisConfig::default();
        let tol = config.tolerance_hz();
        assert!((tol - 8.2709).abs() < 0.001, "got {}", tol);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let mut config = AnalysisConfig::default();
        config.hop_size = 0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.hop_size = 4096;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.min_frequency = 3000.0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.sample_rate = 0;
        assert!(config.validate().is_err());
    }
}
