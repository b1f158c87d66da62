//! Peak-interpolating pitch tracker
//!
//! For each STFT frame, finds spectral peaks inside the allowed frequency range
//! and refines each one with parabolic interpolation. The frame's pitch is the
//! refined frequency of the strongest peak and its confidence is the
//! interpolated peak magnitude.
//!
//! Algorithm (per frame):
//! 1. Zero every bin not exceeding `peak_threshold * max(frame)`
//! 2. Keep bins that are local maxima (`S[k] > S[k-1] && S[k] >= S[k+1]`)
//!    whose centre frequency is in `[min_frequency, max_frequency)`
//! 3. `shift = avg / (2S[k] - S[k+1] - S[k-1])` with `avg = (S[k+1] - S[k-1]) / 2`
//! 4. frequency = `(k + shift) * sr / n_fft`, magnitude = `S[k] + avg * shift / 2`

use super::stft::Spectrogram;

/// Strongest interpolated peak of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePitch {
    /// Frequency in Hz (0.0 if the frame had no candidate)
    pub frequency: f32,
    /// Interpolated magnitude (0.0 if the frame had no candidate)
    pub magnitude: f32,
}

/// Frequency range and peak threshold for the tracker
#[derive(Debug, Clone, Copy)]
pub struct PeakTracker {
    /// Lowest candidate bin frequency in Hz (inclusive)
    pub min_frequency: f32,
    /// Highest candidate bin frequency in Hz (exclusive)
    pub max_frequency: f32,
    /// Threshold relative to the frame maximum
    pub peak_threshold: f32,
}

impl PeakTracker {
    /// Track the strongest peak of every frame
    pub fn track(&self, spectrogram: &Spectrogram) -> Vec<FramePitch> {
        let bin_hz = spectrogram.sample_rate as f32 / spectrogram.frame_size as f32;

        spectrogram
            .frames
            .iter()
            .map(|frame| self.track_frame(frame, bin_hz))
            .collect()
    }

    /// Best candidate of a single magnitude frame
    pub fn track_frame(&self, frame: &[f32], bin_hz: f32) -> FramePitch {
        let mut best = FramePitch {
            frequency: 0.0,
            magnitude: 0.0,
        };

        let n = frame.len();
        if n < 3 {
            return best;
        }

        let frame_max = frame.iter().copied().fold(0.0f32, f32::max);
        let ref_value = self.peak_threshold * frame_max;
        let gated = |k: usize| if frame[k] > ref_value { frame[k] } else { 0.0 };

        for k in 0..n {
            let freq = k as f32 * bin_hz;
            if freq < self.min_frequency || freq >= self.max_frequency {
                continue;
            }

            let here = gated(k);
            let prev = gated(k.saturating_sub(1));
            let next = gated((k + 1).min(n - 1));
            if !(here > prev && here >= next) {
                continue;
            }

            // Interpolation is only defined for interior bins
            let (shift, skew) = if k > 0 && k < n - 1 {
                let avg = 0.5 * (frame[k + 1] - frame[k - 1]);
                let curvature = 2.0 * frame[k] - frame[k + 1] - frame[k - 1];
                let denom = if curvature.abs() < f32::MIN_POSITIVE {
                    curvature + 1.0
                } else {
                    curvature
                };
                let shift = avg / denom;
                (shift, 0.5 * avg * shift)
            } else {
                (0.0, 0.0)
            };

            let magnitude = frame[k] + skew;
            if magnitude > best.magnitude {
                best = FramePitch {
                    frequency: (k as f32 + shift) * bin_hz,
                    magnitude,
                };
            }
        }

        best
    }
}
