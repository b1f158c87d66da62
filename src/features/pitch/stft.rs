//! Short-time Fourier transform magnitudes
//!
//! Centered framing: the signal is padded with `frame_size / 2` zeros on each
//! side so that frame `t` is centered on sample `t * hop_size`. Each frame is
//! multiplied by a periodic Hann window before the FFT.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::AnalysisError;

/// Magnitude spectrogram, stored frame-major
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// `frames[t][k]` is the magnitude of bin `k` in frame `t`
    pub frames: Vec<Vec<f32>>,

    /// FFT size used to compute the bins
    pub frame_size: usize,

    /// Hop size between frames in samples
    pub hop_size: usize,

    /// Sample rate of the analysed signal
    pub sample_rate: u32,
}

impl Spectrogram {
    /// Number of frequency bins per frame (`frame_size / 2 + 1`)
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Number of frames
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Centre frequency of bin `k` in Hz
    pub fn bin_frequency(&self, k: usize) -> f32 {
        k as f32 * self.sample_rate as f32 / self.frame_size as f32
    }
}

/// Periodic Hann window of length `n`
fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f32::consts::PI * i as f32 / n as f32).cos())
        .collect()
}

/// Compute the centered STFT magnitude spectrogram
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT size (typically 2048)
/// * `hop_size` - Hop size (typically 512)
///
/// # Returns
///
/// `1 + samples.len() / hop_size` frames of `frame_size / 2 + 1` magnitudes
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for zero frame or hop sizes
pub fn compute_stft(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
) -> Result<Spectrogram, AnalysisError> {
    if frame_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Frame size must be > 0".to_string(),
        ));
    }

    if hop_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }

    let pad = frame_size / 2;
    let mut padded = vec![0.0f32; samples.len() + 2 * pad];
    padded[pad..pad + samples.len()].copy_from_slice(samples);

    let num_frames = if padded.len() >= frame_size {
        1 + (padded.len() - frame_size) / hop_size
    } else {
        0
    };
    let num_bins = frame_size / 2 + 1;

    log::debug!(
        "Computing STFT: {} samples, frame={}, hop={}, {} frames",
        samples.len(),
        frame_size,
        hop_size,
        num_frames
    );

    let window = hann_window(frame_size);
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(frame_size);

    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); frame_size];
    let mut frames = Vec::with_capacity(num_frames);

    for t in 0..num_frames {
        let start = t * hop_size;
        let frame = &padded[start..start + frame_size];

        for ((slot, &x), &w) in buffer.iter_mut().zip(frame).zip(&window) {
            *slot = Complex::new(x * w, 0.0);
        }

        fft.process(&mut buffer);

        frames.push(buffer[..num_bins].iter().map(|c| c.norm()).collect());
    }

    Ok(Spectrogram {
        frames,
        frame_size,
        hop_size,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, seconds: f32, amplitude: f32) -> Vec<f32> {
        let n = (seconds * sample_rate as f32) as usize;
        (0..n)
            .map(|i| {
                amplitude * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin()
            })
            .collect()
    }

    #[test]
    fn test_frame_count_is_centered() {
        let samples = vec![0.0f32; 22050];
        let spectrogram = compute_stft(&samples, 22050, 2048, 512).unwrap();
        assert_eq!(spectrogram.num_frames(), 1 + 22050 / 512);
        assert_eq!(spectrogram.num_bins(), 1025);
        assert!(spectrogram.frames.iter().all(|f| f.len() == 1025));
    }

    #[test]
    fn test_empty_signal_gives_one_silent_frame() {
        let spectrogram = compute_stft(&[], 22050, 2048, 512).unwrap();
        assert_eq!(spectrogram.num_frames(), 1);
        assert!(spectrogram.frames[0].iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_sine_peak_bin() {
        let samples = sine(440.0, 22050, 1.0, 0.5);
        let spectrogram = compute_stft(&samples, 22050, 2048, 512).unwrap();
        let mid = &spectrogram.frames[spectrogram.num_frames() / 2];
        let (peak, _) = mid
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap();
        // 440 Hz sits at bin 40.87 for a 2048-point FFT at 22050 Hz
        assert_eq!(peak, 41);
        assert!((spectrogram.bin_frequency(41) - 441.43).abs() < 0.01);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(compute_stft(&[0.0; 100], 22050, 0, 512).is_err());
        assert!(compute_stft(&[0.0; 100], 22050, 2048, 0).is_err());
    }
}
