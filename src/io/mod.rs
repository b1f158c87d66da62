//! Audio I/O
//!
//! Decodes audio files to mono f32 samples. Symphonia handles every
//! supported container; WAV files it rejects are retried with hound.

pub mod decoder;

pub use decoder::{decode_audio, DecodedAudio};
