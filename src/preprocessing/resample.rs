//! Sample rate conversion
//!
//! Band-limited FFT resampling with rubato. Content above the target Nyquist
//! frequency is removed before it can fold back into the pitch range. Linear
//! interpolation is only used if rubato cannot be set up for the rate pair.

use rubato::{FftFixedIn, Resampler};

use crate::error::AnalysisError;

/// Input frames per rubato processing call
const CHUNK_SIZE: usize = 1024;

/// Sub-chunks per chunk (shorter FFTs, same latency)
const SUB_CHUNKS: usize = 2;

type ResampleResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Resample mono audio from `from_rate` to `to_rate`
///
/// # Arguments
///
/// * `samples` - Mono input samples
/// * `from_rate` - Input sample rate in Hz
/// * `to_rate` - Output sample rate in Hz
///
/// # Returns
///
/// `round(len * to_rate / from_rate)` samples, aligned with the input (the
/// resampler delay is removed); the input itself when the rates match
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if either rate is zero
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AnalysisError> {
    if from_rate == 0 || to_rate == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Invalid sample rates: from={}, to={}",
            from_rate, to_rate
        )));
    }

    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = ((samples.len() as f64) / ratio).round() as usize;
    if out_len == 0 {
        return Ok(Vec::new());
    }

    log::debug!(
        "Resampling {} samples from {} Hz to {} Hz ({} output samples)",
        samples.len(),
        from_rate,
        to_rate,
        out_len
    );

    match resample_fft(samples, from_rate, to_rate, out_len) {
        Ok(resampled) => Ok(resampled),
        Err(e) => {
            log::warn!(
                "FFT resampler unavailable for {} Hz -> {} Hz ({}), using linear interpolation",
                from_rate,
                to_rate,
                e
            );
            Ok(resample_linear(samples, ratio, out_len))
        }
    }
}

fn resample_fft(
    samples: &[f32],
    from_rate: u32,
    to_rate: u32,
    out_len: usize,
) -> ResampleResult<Vec<f32>> {
    let mut resampler = FftFixedIn::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        1,
    )?;

    let delay = resampler.output_delay();
    let wanted = out_len + delay;
    let mut output: Vec<f32> = Vec::with_capacity(wanted + CHUNK_SIZE);
    let mut pos = 0;

    // Keep feeding (zero-padded past the end) until the delayed tail is flushed
    while output.len() < wanted {
        let frames = resampler.input_frames_next();
        let mut chunk: Vec<f32> = samples
            .get(pos..(pos + frames).min(samples.len()))
            .map(|s| s.to_vec())
            .unwrap_or_default();
        chunk.resize(frames, 0.0);

        let input = vec![chunk];
        let result = resampler.process(&input, None)?;
        let produced = result.first().map(|ch| ch.len()).unwrap_or(0);
        if produced == 0 {
            return Err("resampler produced no output".into());
        }
        output.extend_from_slice(&result[0]);

        pos += frames;
    }

    output.drain(..delay);
    output.truncate(out_len);

    Ok(output)
}

/// Linear interpolation fallback; `ratio` is input samples per output sample
fn resample_linear(samples: &[f32], ratio: f64, out_len: usize) -> Vec<f32> {
    let last = samples.len() - 1;
    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = (pos.floor() as usize).min(last);
            let frac = (pos - idx as f64) as f32;
            let next = samples[(idx + 1).min(last)];
            samples[idx] + (next - samples[idx]) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, sample_rate: u32, seconds: f32) -> Vec<f32> {
        (0..(sample_rate as f32 * seconds) as usize)
            .map(|i| (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin() * 0.5)
            .collect()
    }

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len().max(1) as f32).sqrt()
    }

    #[test]
    fn test_same_rate_is_identity() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(resample(&samples, 22050, 22050).unwrap(), samples);
    }

    #[test]
    fn test_output_length() {
        let samples = vec![0.0f32; 44100];
        assert_eq!(resample(&samples, 44100, 22050).unwrap().len(), 22050);
        assert_eq!(resample(&samples, 44100, 48000).unwrap().len(), 48000);
        assert_eq!(resample(&samples, 48000, 22050).unwrap().len(), 20258);
    }

    #[test]
    fn test_downsampled_sine_keeps_frequency() {
        let out = resample(&sine(440.0, 44100, 1.0), 44100, 22050).unwrap();

        // Count positive-going zero crossings over one second
        let crossings = out.windows(2).filter(|w| w[0] < 0.0 && w[1] >= 0.0).count();
        assert!((crossings as i32 - 440).abs() <= 2, "got {} crossings", crossings);
    }

    #[test]
    fn test_output_is_aligned_with_input() {
        let input = sine(440.0, 44100, 1.0);
        let out = resample(&input, 44100, 22050).unwrap();

        // Every second input sample lines up with one output sample
        for i in (2000..20000).step_by(997) {
            assert!((out[i] - input[2 * i]).abs() < 0.05, "sample {}: {} vs {}", i, out[i], input[2 * i]);
        }
    }

    #[test]
    fn test_content_above_target_nyquist_is_removed() {
        let out = resample(&sine(20000.0, 44100, 1.0), 44100, 22050).unwrap();
        let middle = &out[2000..out.len() - 2000];
        assert!(rms(middle) < 1e-3, "rms {}", rms(middle));
    }

    #[test]
    fn test_upsampling_keeps_level() {
        let out = resample(&sine(440.0, 8000, 1.0), 8000, 22050).unwrap();
        let middle = &out[2000..out.len() - 2000];
        assert!((rms(middle) - 0.5 / 2f32.sqrt()).abs() < 0.02, "rms {}", rms(middle));
    }

    #[test]
    fn test_linear_fallback_interpolates() {
        let out = resample_linear(&[0.0, 1.0, 0.0], 0.5, 6);
        assert_eq!(out.len(), 6);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!((out[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(resample(&[0.0], 0, 22050).is_err());
        assert!(resample(&[0.0], 22050, 0).is_err());
    }
}
