//! Audio preprocessing modules
//!
//! - Channel downmixing
//! - Sample rate conversion

pub mod channel_mixer;
pub mod resample;
