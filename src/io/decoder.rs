//! Audio decoding using Symphonia
//!
//! Decodes any container/codec Symphonia was built with into mono `f32`
//! samples normalized to [-1.0, 1.0]. WAV files Symphonia refuses to probe are
//! retried with hound before the original error is reported.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::AnalysisError;
use crate::preprocessing::channel_mixer::downmix_interleaved;

/// Decoded mono audio at its native sample rate
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Mono samples in [-1.0, 1.0]
    pub samples: Vec<f32>,

    /// Native sample rate in Hz
    pub sample_rate: u32,

    /// Channel count of the source before downmixing
    pub channels: usize,
}

impl DecodedAudio {
    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode an audio file to mono PCM samples
///
/// # Arguments
///
/// * `path` - Path to audio file
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if the file is missing, unreadable,
/// has no audio track or uses an unsupported codec. Decode failures are never
/// reported as empty audio.
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<DecodedAudio, AnalysisError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    match decode_with_symphonia(path) {
        Ok(audio) => Ok(audio),
        Err(err) => {
            let is_wav = path
                .extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("wav"))
                .unwrap_or(false);

            if is_wav {
                log::debug!("Symphonia failed on {} ({}), retrying with hound", path.display(), err);
                decode_wav_with_hound(path).map_err(|_| err)
            } else {
                Err(err)
            }
        }
    }
}

fn decode_with_symphonia(path: &Path) -> Result<DecodedAudio, AnalysisError> {
    let file = File::open(path).map_err(|e| {
        AnalysisError::DecodingError(format!("Cannot open {}: {}", path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(&ext.to_string_lossy());
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| {
            AnalysisError::DecodingError(format!(
                "Failed to probe audio format of {}: {}",
                path.display(),
                e
            ))
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| {
            AnalysisError::DecodingError(format!("No audio track found in {}", path.display()))
        })?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
        AnalysisError::DecodingError(format!("Unknown sample rate in {}", path.display()))
    })?;
    let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AnalysisError::DecodingError(format!("Failed to create decoder: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!(
                    "Error reading packet: {}",
                    e
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                // Corrupted packet: skip it, keep the rest of the stream
                skipped_packets += 1;
                log::warn!("Skipping corrupt packet in {}: {}", path.display(), msg);
                continue;
            }
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!("Decode error: {}", e)));
            }
        };

        let spec = *decoded.spec();
        channels = spec.channels.count().max(1);

        let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend(downmix_interleaved(sample_buf.samples(), channels));
    }

    if samples.is_empty() && skipped_packets > 0 {
        return Err(AnalysisError::DecodingError(format!(
            "Every packet of {} failed to decode",
            path.display()
        )));
    }

    log::debug!(
        "Decoded {}: {} samples, {} Hz, {} channel(s)",
        path.display(),
        samples.len(),
        sample_rate,
        channels
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

fn decode_wav_with_hound(path: &Path) -> Result<DecodedAudio, AnalysisError> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| AnalysisError::DecodingError(format!("Invalid WAV file: {}", e)))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AnalysisError::DecodingError(format!("Invalid WAV data: {}", e)))?,
        hound::SampleFormat::Int => {
            let max_value = (1_i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AnalysisError::DecodingError(format!("Invalid WAV data: {}", e)))?
        }
    };

    Ok(DecodedAudio {
        samples: downmix_interleaved(&interleaved, channels),
        sample_rate: spec.sample_rate,
        channels,
    })
}
