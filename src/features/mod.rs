//! Feature extraction modules
//!
//! - Note labelling (Hz to MIDI to pitch class and octave)
//! - Pitch contour extraction (STFT + peak picking)
//! - Pitch-class distribution

pub mod distribution;
pub mod notes;
pub mod pitch;
